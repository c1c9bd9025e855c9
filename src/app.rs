use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;

use crate::components::help::HelpState;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::favorites::path::{self, adjust_path_after_removal};
use crate::favorites::{
    codec, ExportModel, ExportSettings, FavoritesTree, MoveError, MoveMode, Node, NodeDraft,
    NodePath, Platform,
};
use crate::theme::{resolve_theme, ThemeColors};

/// The kind of dialog being displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// New folder at the top level (`parent: None`) or inside a folder.
    AddFolder { parent: Option<NodePath> },
    AddLink { parent: Option<NodePath> },
    EditFolder { path: NodePath },
    EditLink { path: NodePath },
    DeleteConfirm { path: NodePath, name: String },
    RootLabel,
    ImportPath,
    Error { message: String },
}

impl DialogKind {
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::AddFolder { parent: None } => "Add Folder",
            DialogKind::AddFolder { parent: Some(_) } => "Add Subfolder",
            DialogKind::AddLink { parent: None } => "Add Link",
            DialogKind::AddLink { parent: Some(_) } => "Add Link to Folder",
            DialogKind::EditFolder { .. } => "Edit Folder",
            DialogKind::EditLink { .. } => "Edit Link",
            DialogKind::DeleteConfirm { .. } => "Delete Confirmation",
            DialogKind::RootLabel => "Root Label",
            DialogKind::ImportPath => "Import File",
            DialogKind::Error { .. } => "Error",
        }
    }

    /// Labels of the text fields the dialog edits; empty for message dialogs.
    pub fn field_labels(&self) -> &'static [&'static str] {
        match self {
            DialogKind::AddFolder { .. } | DialogKind::EditFolder { .. } => &["Name"],
            DialogKind::AddLink { .. } | DialogKind::EditLink { .. } => &["Name", "URL"],
            DialogKind::RootLabel => &["Label"],
            DialogKind::ImportPath => &["Path"],
            DialogKind::DeleteConfirm { .. } | DialogKind::Error { .. } => &[],
        }
    }
}

/// Application mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    Dialog(DialogKind),
    Help,
}

/// A single-line text input with a byte-offset cursor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputField {
    pub text: String,
    pub cursor: usize,
}

impl InputField {
    /// Field prefilled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }
}

/// Text inputs of the open dialog.
#[derive(Debug, Default)]
pub struct DialogState {
    pub fields: Vec<InputField>,
    pub focus: usize,
    /// Validation message shown inside the dialog.
    pub error: Option<String>,
}

impl DialogState {
    pub fn focused_mut(&mut self) -> Option<&mut InputField> {
        self.fields.get_mut(self.focus)
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|field| field.text.as_str())
            .unwrap_or("")
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }
}

/// One visible row of the tree panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatItem {
    pub path: NodePath,
    pub depth: usize,
    pub name: String,
    pub url: Option<String>,
    pub is_folder: bool,
    pub child_count: usize,
    pub is_last_sibling: bool,
}

/// Flatten the tree depth-first into display rows. Folders are always open.
pub fn flatten(tree: &FavoritesTree) -> Vec<FlatItem> {
    let mut items = Vec::with_capacity(tree.node_count());
    let mut path = Vec::new();
    flatten_into(tree.items(), &mut path, &mut items);
    items
}

fn flatten_into(nodes: &[Node], path: &mut NodePath, out: &mut Vec<FlatItem>) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        out.push(FlatItem {
            path: path.clone(),
            depth: path.len() - 1,
            name: node.name().to_string(),
            url: node.url().map(str::to_string),
            is_folder: node.is_folder(),
            child_count: node.children().map_or(0, <[Node]>::len),
            is_last_sibling: index + 1 == nodes.len(),
        });
        if let Some(children) = node.children() {
            flatten_into(children, path, out);
        }
        path.pop();
    }
}

/// Side effects the front-end runs outside the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read, detect and parse a document.
    Import(PathBuf),
    /// Write a rendered document.
    Export {
        platform: Platform,
        path: PathBuf,
        document: String,
    },
}

/// Main application state.
pub struct App {
    pub tree: FavoritesTree,
    pub flat_items: Vec<FlatItem>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub mode: AppMode,
    pub dialog_state: DialogState,
    pub help_state: HelpState,
    pub status_message: Option<(String, Instant)>,
    pub status_is_error: bool,
    /// Node marked with `m`, waiting for `p` or `i`.
    pub move_source: Option<NodePath>,
    pub show_preview: bool,
    pub preview_lines: Vec<String>,
    pub preview_scroll: usize,
    /// Document the tree was last imported from.
    pub source_file: Option<PathBuf>,
    /// Modified since the last import or export.
    pub dirty: bool,
    pub should_quit: bool,
    pub theme: ThemeColors,
    pub confirm_delete: bool,
    pub output_dir: PathBuf,
    pub export_settings: ExportSettings,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut tree = FavoritesTree::new();
        tree.set_root_label(config.root_label());
        let mut app = Self {
            tree,
            flat_items: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            mode: AppMode::Normal,
            dialog_state: DialogState::default(),
            help_state: HelpState::default(),
            status_message: None,
            status_is_error: false,
            move_source: None,
            show_preview: config.show_preview(),
            preview_lines: Vec::new(),
            preview_scroll: 0,
            source_file: None,
            dirty: false,
            should_quit: false,
            theme: resolve_theme(&config.theme),
            confirm_delete: config.confirm_delete(),
            output_dir: config.output_dir(),
            export_settings: config.export_settings(),
        };
        app.refresh();
        app
    }

    /// Rebuild the rows and the model preview from the tree.
    pub fn refresh(&mut self) {
        self.flat_items = flatten(&self.tree);
        if self.selected_index >= self.flat_items.len() {
            self.selected_index = self.flat_items.len().saturating_sub(1);
        }
        self.preview_lines = match ExportModel::from_tree(&self.tree).to_json_pretty() {
            Ok(json) => json.lines().map(str::to_string).collect(),
            Err(e) => {
                log::error!("preview failed: {}", e);
                vec![e.to_string()]
            }
        };
        let max_scroll = self.preview_lines.len().saturating_sub(1);
        self.preview_scroll = self.preview_scroll.min(max_scroll);
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.refresh();
    }

    // ── Selection ────────────────────────────────────────────────────────────

    pub fn selected_item(&self) -> Option<&FlatItem> {
        self.flat_items.get(self.selected_index)
    }

    pub fn selected_path(&self) -> Option<NodePath> {
        self.selected_item().map(|item| item.path.clone())
    }

    /// Select the row showing `path`; no-op if there is none.
    pub fn select_path(&mut self, path: &[usize]) {
        if let Some(index) = self.flat_items.iter().position(|item| item.path == path) {
            self.selected_index = index;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.flat_items.len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.flat_items.len().saturating_sub(1);
    }

    /// Keep the selected row inside a viewport of `visible_height` rows.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }

    // ── Preview and help ─────────────────────────────────────────────────────

    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
    }

    pub fn scroll_preview_down(&mut self, lines: usize) {
        let max_scroll = self.preview_lines.len().saturating_sub(1);
        self.preview_scroll = (self.preview_scroll + lines).min(max_scroll);
    }

    pub fn scroll_preview_up(&mut self, lines: usize) {
        self.preview_scroll = self.preview_scroll.saturating_sub(lines);
    }

    pub fn open_help(&mut self) {
        self.help_state = HelpState::default();
        self.mode = AppMode::Help;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    // ── Dialogs ──────────────────────────────────────────────────────────────

    /// Open a dialog, prefilling its fields from the tree where it edits
    /// existing values.
    pub fn open_dialog(&mut self, kind: DialogKind) {
        let prefill: Vec<String> = match &kind {
            DialogKind::EditFolder { path } | DialogKind::EditLink { path } => {
                match self.tree.resolve(path) {
                    Some(node) => {
                        let mut values = vec![node.name().to_string()];
                        values.extend(node.url().map(str::to_string));
                        values
                    }
                    None => Vec::new(),
                }
            }
            DialogKind::RootLabel => vec![self.tree.root_label().to_string()],
            DialogKind::ImportPath => vec![self
                .source_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default()],
            _ => Vec::new(),
        };

        let fields = (0..kind.field_labels().len())
            .map(|i| InputField::with_text(prefill.get(i).cloned().unwrap_or_default()))
            .collect();
        self.dialog_state = DialogState {
            fields,
            focus: 0,
            error: None,
        };
        self.mode = AppMode::Dialog(kind);
    }

    pub fn close_dialog(&mut self) {
        self.mode = AppMode::Normal;
        self.dialog_state = DialogState::default();
    }

    pub fn dialog_input_char(&mut self, c: char) {
        if let Some(field) = self.dialog_state.focused_mut() {
            field.insert_char(c);
        }
    }

    pub fn dialog_delete_char(&mut self) {
        if let Some(field) = self.dialog_state.focused_mut() {
            field.delete_char();
        }
    }

    pub fn dialog_move_cursor_left(&mut self) {
        if let Some(field) = self.dialog_state.focused_mut() {
            field.move_left();
        }
    }

    pub fn dialog_move_cursor_right(&mut self) {
        if let Some(field) = self.dialog_state.focused_mut() {
            field.move_right();
        }
    }

    pub fn dialog_cursor_home(&mut self) {
        if let Some(field) = self.dialog_state.focused_mut() {
            field.home();
        }
    }

    pub fn dialog_cursor_end(&mut self) {
        if let Some(field) = self.dialog_state.focused_mut() {
            field.end();
        }
    }

    pub fn dialog_next_field(&mut self) {
        self.dialog_state.next_field();
    }

    /// Show an error in a modal dialog and log it.
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.open_dialog(DialogKind::Error { message });
    }

    /// Add a top-level folder (`F`).
    pub fn begin_add_folder(&mut self) {
        self.open_dialog(DialogKind::AddFolder { parent: None });
    }

    /// Add a top-level link (`L`).
    pub fn begin_add_link(&mut self) {
        self.open_dialog(DialogKind::AddLink { parent: None });
    }

    /// Add a folder inside the selected folder (`f`).
    pub fn begin_add_subfolder(&mut self) {
        if let Some(parent) = self.selected_folder_path() {
            self.open_dialog(DialogKind::AddFolder {
                parent: Some(parent),
            });
        }
    }

    /// Add a link inside the selected folder (`l`).
    pub fn begin_add_child_link(&mut self) {
        if let Some(parent) = self.selected_folder_path() {
            self.open_dialog(DialogKind::AddLink {
                parent: Some(parent),
            });
        }
    }

    fn selected_folder_path(&mut self) -> Option<NodePath> {
        match self.selected_item() {
            Some(item) if item.is_folder => Some(item.path.clone()),
            Some(_) => {
                self.set_error_status("Select a folder first");
                None
            }
            None => {
                self.set_error_status("Nothing selected");
                None
            }
        }
    }

    pub fn begin_edit_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let path = item.path.clone();
        let kind = if item.is_folder {
            DialogKind::EditFolder { path }
        } else {
            DialogKind::EditLink { path }
        };
        self.open_dialog(kind);
    }

    pub fn begin_delete_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let path = item.path.clone();
        if self.confirm_delete {
            let name = item.name.clone();
            self.open_dialog(DialogKind::DeleteConfirm { path, name });
        } else {
            self.delete_at(&path);
        }
    }

    pub fn begin_edit_root_label(&mut self) {
        self.open_dialog(DialogKind::RootLabel);
    }

    pub fn begin_import(&mut self) {
        self.open_dialog(DialogKind::ImportPath);
    }

    /// Apply the open dialog. Validation errors keep it open with the message
    /// shown inline.
    pub fn confirm_dialog(&mut self) -> Option<Command> {
        let AppMode::Dialog(kind) = self.mode.clone() else {
            return None;
        };
        match self.apply_dialog(&kind) {
            Ok(command) => {
                if matches!(self.mode, AppMode::Dialog(ref open) if *open == kind) {
                    self.close_dialog();
                }
                command
            }
            Err(AppError::Validation(message)) => {
                self.dialog_state.error = Some(message);
                None
            }
            Err(e) => {
                self.show_error(e.to_string());
                None
            }
        }
    }

    fn apply_dialog(&mut self, kind: &DialogKind) -> Result<Option<Command>> {
        let first = self.dialog_state.value(0).to_string();
        let second = self.dialog_state.value(1).to_string();
        match kind {
            DialogKind::AddFolder { parent } => {
                let node = NodeDraft::folder(&first)?.into_node();
                self.add_node(parent.as_deref(), node)?;
            }
            DialogKind::AddLink { parent } => {
                let node = NodeDraft::link(&first, &second)?.into_node();
                self.add_node(parent.as_deref(), node)?;
            }
            DialogKind::EditFolder { path } => {
                let edit = NodeDraft::folder(&first)?.into_edit();
                self.tree.edit(path, edit)?;
                self.mark_changed();
                self.set_status_message(format!("Renamed folder to \"{}\"", first.trim()));
            }
            DialogKind::EditLink { path } => {
                let edit = NodeDraft::link(&first, &second)?.into_edit();
                self.tree.edit(path, edit)?;
                self.mark_changed();
                self.set_status_message(format!("Updated link \"{}\"", first.trim()));
            }
            DialogKind::DeleteConfirm { path, .. } => {
                self.delete_at(path);
            }
            DialogKind::RootLabel => {
                self.tree.set_root_label(&first);
                self.mark_changed();
                let message = format!("Root label set to \"{}\"", self.tree.root_label());
                self.set_status_message(message);
            }
            DialogKind::ImportPath => {
                let path = first.trim();
                if path.is_empty() {
                    return Err(AppError::Validation("File path is required".into()));
                }
                self.set_status_message(format!("Importing {}…", path));
                return Ok(Some(Command::Import(PathBuf::from(path))));
            }
            DialogKind::Error { .. } => {}
        }
        Ok(None)
    }

    // ── Tree edits ───────────────────────────────────────────────────────────

    fn add_node(&mut self, parent: Option<&[usize]>, node: Node) -> Result<()> {
        let name = node.name().to_string();
        let new_path = match parent {
            Some(parent) => {
                self.tree.add_child(parent, node)?;
                let index = self
                    .tree
                    .resolve(parent)
                    .and_then(Node::children)
                    .map_or(0, |children| children.len().saturating_sub(1));
                let mut path = parent.to_vec();
                path.push(index);
                path
            }
            None => {
                self.tree.add_root(node);
                vec![self.tree.len() - 1]
            }
        };
        log::debug!("added \"{}\" at {:?}", name, new_path);
        self.move_source = self
            .move_source
            .take()
            .map(|mark| path::track_insertion(&mark, &new_path));
        self.mark_changed();
        self.select_path(&new_path);
        self.set_status_message(format!("Added \"{}\"", name));
        Ok(())
    }

    pub fn delete_at(&mut self, path: &[usize]) {
        match self.tree.remove(path) {
            Some(node) => {
                self.move_source = self
                    .move_source
                    .take()
                    .and_then(|mark| path::track_removal(&mark, path));
                log::info!("deleted \"{}\" ({} nodes)", node.name(), node.subtree_len());
                self.mark_changed();
                self.set_status_message(format!("Deleted \"{}\"", node.name()));
            }
            None => self.set_error_status(format!("Nothing to delete at {:?}", path)),
        }
    }

    /// Swap the selected node with its previous sibling (`K`).
    pub fn move_selected_up(&mut self) {
        let Some(path) = self.selected_path() else {
            return;
        };
        let Some((&index, parent)) = path.split_last() else {
            return;
        };
        if index == 0 {
            return;
        }
        let mut dest = parent.to_vec();
        dest.push(index - 1);
        self.apply_move(&path, &dest, MoveMode::Reorder);
    }

    /// Swap the selected node with its next sibling (`J`).
    pub fn move_selected_down(&mut self) {
        let Some(path) = self.selected_path() else {
            return;
        };
        let Some((&index, parent)) = path.split_last() else {
            return;
        };
        let sibling_count = if parent.is_empty() {
            self.tree.len()
        } else {
            self.tree
                .resolve(parent)
                .and_then(Node::children)
                .map_or(0, <[Node]>::len)
        };
        if index + 1 >= sibling_count {
            return;
        }
        // The removal of the source shifts the slot after the next sibling
        // down by one.
        let mut dest = parent.to_vec();
        dest.push(index + 2);
        self.apply_move(&path, &dest, MoveMode::Reorder);
    }

    /// Mark the selected node as the source of the next move (`m`).
    pub fn mark_for_move(&mut self) {
        if let Some(item) = self.selected_item() {
            let message = format!(
                "Marked \"{}\": p to place before, i to drop into a folder",
                item.name
            );
            self.move_source = Some(item.path.clone());
            self.set_status_message(message);
        }
    }

    pub fn clear_move_mark(&mut self) {
        if self.move_source.take().is_some() {
            self.set_status_message("Move cancelled".to_string());
        }
    }

    /// Move the marked node relative to the selected row.
    pub fn place_marked(&mut self, mode: MoveMode) {
        let Some(source) = self.move_source.clone() else {
            self.set_error_status("Nothing marked; press m on a row first");
            return;
        };
        let Some(dest) = self.selected_path() else {
            return;
        };
        if self.apply_move(&source, &dest, mode) {
            self.move_source = None;
        }
    }

    /// Run a move and select the node at its new position. A node left
    /// detached by an invalid destination is put back where it came from.
    fn apply_move(&mut self, source: &[usize], dest: &[usize], mode: MoveMode) -> bool {
        match self.tree.move_node(source, dest, mode) {
            Ok(()) => {
                let adjusted = adjust_path_after_removal(dest, source);
                let landed = match mode {
                    MoveMode::Reorder => adjusted,
                    MoveMode::IntoFolder => {
                        let last = self
                            .tree
                            .resolve(&adjusted)
                            .and_then(Node::children)
                            .map_or(0, |children| children.len().saturating_sub(1));
                        let mut path = adjusted;
                        path.push(last);
                        path
                    }
                };
                self.track_mark_after_move(source, &landed);
                self.mark_changed();
                self.select_path(&landed);
                true
            }
            Err(MoveError::Detached { node, source, dest }) => {
                let name = node.name().to_string();
                let restored = match self.tree.insert(&source, node.clone()) {
                    Ok(()) => source.clone(),
                    Err(e) => {
                        log::error!("could not restore \"{}\" at {:?}: {}", name, source, e);
                        self.tree.add_root(node);
                        vec![self.tree.len() - 1]
                    }
                };
                self.track_mark_after_move(&source, &restored);
                self.refresh();
                self.select_path(&restored);
                self.set_error_status(format!("Cannot move \"{}\" to {:?}", name, dest));
                false
            }
            Err(e) => {
                self.set_error_status(e.to_string());
                false
            }
        }
    }

    /// Keep the move mark on the same node after `source` was relocated to
    /// `landed`. A mark on or inside the moved node travels with it.
    fn track_mark_after_move(&mut self, source: &[usize], landed: &[usize]) {
        self.move_source = self.move_source.take().map(|mark| {
            match path::track_removal(&mark, source) {
                Some(shifted) => path::track_insertion(&shifted, landed),
                None => {
                    let mut moved = landed.to_vec();
                    moved.extend_from_slice(&mark[source.len()..]);
                    moved
                }
            }
        });
    }

    // ── Import / export ──────────────────────────────────────────────────────

    /// Render the tree for `platform` and choose the output file.
    pub fn prepare_export(&mut self, platform: Platform) -> Option<Command> {
        match codec::export(platform, &self.tree, &self.export_settings) {
            Ok(document) => {
                let name = codec::default_file_name(platform, Utc::now().timestamp_millis());
                let path = self.output_dir.join(name);
                self.set_status_message(format!("Exporting {} document…", platform));
                Some(Command::Export {
                    platform,
                    path,
                    document,
                })
            }
            Err(e) => {
                self.show_error(format!("Export failed: {}", e));
                None
            }
        }
    }

    /// Replace the tree with a successfully imported one; on failure the
    /// current tree stays as it is.
    pub fn handle_import_finished(&mut self, path: PathBuf, result: Result<FavoritesTree>) {
        match result {
            Ok(tree) => {
                log::info!("imported {} nodes from {}", tree.node_count(), path.display());
                self.set_status_message(format!(
                    "Imported {} entries from {}",
                    tree.node_count(),
                    path.display()
                ));
                self.tree = tree;
                self.source_file = Some(path);
                self.move_source = None;
                self.selected_index = 0;
                self.scroll_offset = 0;
                self.preview_scroll = 0;
                self.dirty = false;
                self.refresh();
            }
            Err(e) => self.show_error(format!("Import of {} failed: {}", path.display(), e)),
        }
    }

    pub fn handle_export_finished(
        &mut self,
        path: PathBuf,
        platform: Platform,
        result: Result<()>,
    ) {
        match result {
            Ok(()) => {
                log::info!("wrote {} document to {}", platform, path.display());
                self.dirty = false;
                self.set_status_message(format!("Saved {}", path.display()));
            }
            Err(e) => self.show_error(format!("Writing {} failed: {}", path.display(), e)),
        }
    }

    // ── Status ───────────────────────────────────────────────────────────────

    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
        self.status_is_error = false;
    }

    pub fn set_error_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::warn!("{}", msg);
        self.status_message = Some((msg, Instant::now()));
        self.status_is_error = true;
    }

    /// Clear the status message once it has been shown for 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() >= 3 {
                self.status_message = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
