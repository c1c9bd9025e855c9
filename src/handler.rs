use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::{App, AppMode, Command, DialogKind};
use crate::error::Result;
use crate::event::Event;
use crate::favorites::{codec, FavoritesTree, MoveMode, Platform};

/// Handle a key event, spawning any file work it triggers.
pub fn handle_key_event(app: &mut App, key: KeyEvent, tx: &UnboundedSender<Event>) {
    if let Some(command) = dispatch_key(app, key) {
        spawn_command(command, tx.clone());
    }
}

/// Route a key to the handler of the current mode.
pub fn dispatch_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return None;
    }
    match app.mode.clone() {
        AppMode::Normal => handle_normal_key(app, key),
        AppMode::Help => {
            handle_help_key(app, key);
            None
        }
        AppMode::Dialog(kind) => handle_dialog_key(app, &kind, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('F') => app.begin_add_folder(),
        KeyCode::Char('L') => app.begin_add_link(),
        KeyCode::Char('f') => app.begin_add_subfolder(),
        KeyCode::Char('l') => app.begin_add_child_link(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.begin_delete_selected(),
        KeyCode::Char('K') => app.move_selected_up(),
        KeyCode::Char('J') => app.move_selected_down(),
        KeyCode::Char('m') => app.mark_for_move(),
        KeyCode::Char('p') => app.place_marked(MoveMode::Reorder),
        KeyCode::Char('i') => app.place_marked(MoveMode::IntoFolder),
        KeyCode::Esc => app.clear_move_mark(),
        KeyCode::Char('r') => app.begin_edit_root_label(),
        KeyCode::Char('o') => app.begin_import(),
        KeyCode::Char('W') => return app.prepare_export(Platform::Windows),
        KeyCode::Char('M') => return app.prepare_export(Platform::MacOs),
        KeyCode::Tab => app.toggle_preview(),
        KeyCode::PageDown => app.scroll_preview_down(10),
        KeyCode::PageUp => app.scroll_preview_up(10),
        KeyCode::Char('?') => app.open_help(),
        _ => {}
    }
    None
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.close_help(),
        KeyCode::Char('j') | KeyCode::Down => app.help_state.scroll_offset += 1,
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_state.scroll_offset = app.help_state.scroll_offset.saturating_sub(1)
        }
        _ => {}
    }
}

fn handle_dialog_key(app: &mut App, kind: &DialogKind, key: KeyEvent) -> Option<Command> {
    match kind {
        DialogKind::Error { .. } => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.close_dialog();
            }
            None
        }
        DialogKind::DeleteConfirm { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_dialog(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_dialog();
                None
            }
            _ => None,
        },
        _ => match key.code {
            KeyCode::Enter => app.confirm_dialog(),
            KeyCode::Esc => {
                app.close_dialog();
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                app.dialog_next_field();
                None
            }
            KeyCode::Backspace => {
                app.dialog_delete_char();
                None
            }
            KeyCode::Left => {
                app.dialog_move_cursor_left();
                None
            }
            KeyCode::Right => {
                app.dialog_move_cursor_right();
                None
            }
            KeyCode::Home => {
                app.dialog_cursor_home();
                None
            }
            KeyCode::End => {
                app.dialog_cursor_end();
                None
            }
            KeyCode::Char(c) => {
                app.dialog_input_char(c);
                None
            }
            _ => None,
        },
    }
}

/// Run a command on a background task; its outcome comes back as an event.
pub fn spawn_command(command: Command, tx: UnboundedSender<Event>) {
    match command {
        Command::Import(path) => {
            tokio::spawn(async move {
                let result = read_document(&path, None).await;
                let _ = tx.send(Event::ImportFinished { path, result });
            });
        }
        Command::Export {
            platform,
            path,
            document,
        } => {
            tokio::spawn(async move {
                let result = write_document(&path, &document).await;
                let _ = tx.send(Event::ExportFinished {
                    path,
                    platform,
                    result,
                });
            });
        }
    }
}

/// Read and parse a document, detecting its platform unless `platform` is given.
pub async fn read_document(path: &Path, platform: Option<Platform>) -> Result<FavoritesTree> {
    let text = tokio::fs::read_to_string(path).await?;
    let platform = platform.unwrap_or_else(|| Platform::detect(&text));
    log::debug!("reading {} as {}", path.display(), platform);
    codec::import(platform, &text)
}

/// Write a document, creating its directory when missing.
pub async fn write_document(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, document).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::favorites::{ExportSettings, Node};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::path::PathBuf;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn setup_app() -> App {
        let mut app = App::new(&AppConfig::default());
        app.tree = FavoritesTree::from_parts(
            "Corp",
            vec![
                Node::folder_with("Work", vec![Node::link("Mail", "https://mail.example")]),
                Node::link("Docs", "https://docs.example"),
            ],
        );
        app.refresh();
        app
    }

    fn press_all(app: &mut App, keys: &[KeyCode]) -> Option<Command> {
        let mut last = None;
        for code in keys {
            last = dispatch_key(app, key(*code));
        }
        last
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            dispatch_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn q_quits() {
        let mut app = setup_app();
        dispatch_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_even_in_dialog() {
        let mut app = setup_app();
        app.begin_add_folder();
        let mut ctrl_c = key(KeyCode::Char('c'));
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        dispatch_key(&mut app, ctrl_c);
        assert!(app.should_quit);
    }

    #[test]
    fn navigation_keys() {
        let mut app = setup_app();
        press_all(&mut app, &[KeyCode::Char('j'), KeyCode::Down]);
        assert_eq!(app.selected_index, 2);
        press_all(&mut app, &[KeyCode::Char('k')]);
        assert_eq!(app.selected_index, 1);
        press_all(&mut app, &[KeyCode::Char('G')]);
        assert_eq!(app.selected_index, 2);
        press_all(&mut app, &[KeyCode::Char('g')]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn add_link_through_dialog_keys() {
        let mut app = setup_app();
        dispatch_key(&mut app, key(KeyCode::Char('L')));
        type_str(&mut app, "News");
        dispatch_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "https://news.example");
        dispatch_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(
            app.tree.resolve(&[2]),
            Some(&Node::link("News", "https://news.example"))
        );
    }

    #[test]
    fn typing_q_in_dialog_does_not_quit() {
        let mut app = setup_app();
        dispatch_key(&mut app, key(KeyCode::Char('F')));
        type_str(&mut app, "quarterly");
        assert!(!app.should_quit);
        assert_eq!(app.dialog_state.value(0), "quarterly");
    }

    #[test]
    fn escape_cancels_dialog() {
        let mut app = setup_app();
        dispatch_key(&mut app, key(KeyCode::Char('F')));
        type_str(&mut app, "x");
        dispatch_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.tree.len(), 2);
    }

    #[test]
    fn delete_confirm_yes_and_no() {
        let mut app = setup_app();
        press_all(&mut app, &[KeyCode::Char('G'), KeyCode::Char('d'), KeyCode::Char('n')]);
        assert_eq!(app.tree.len(), 2);
        press_all(&mut app, &[KeyCode::Delete, KeyCode::Char('y')]);
        assert_eq!(app.tree.len(), 1);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn shift_k_and_j_reorder() {
        let mut app = setup_app();
        dispatch_key(&mut app, key(KeyCode::Char('J')));
        assert_eq!(app.tree.resolve(&[0]).map(Node::name), Some("Docs"));
        dispatch_key(&mut app, key(KeyCode::Char('K')));
        assert_eq!(app.tree.resolve(&[0]).map(Node::name), Some("Work"));
    }

    #[test]
    fn mark_then_drop_into_folder() {
        let mut app = setup_app();
        press_all(
            &mut app,
            &[
                KeyCode::Char('G'),
                KeyCode::Char('m'),
                KeyCode::Char('g'),
                KeyCode::Char('i'),
            ],
        );
        assert_eq!(app.tree.len(), 1);
        assert_eq!(app.tree.resolve(&[0, 1]).map(Node::name), Some("Docs"));
    }

    #[test]
    fn escape_clears_move_mark() {
        let mut app = setup_app();
        press_all(&mut app, &[KeyCode::Char('m'), KeyCode::Esc]);
        assert!(app.move_source.is_none());
    }

    #[test]
    fn export_keys_return_commands() {
        let mut app = setup_app();
        assert!(matches!(
            dispatch_key(&mut app, key(KeyCode::Char('W'))),
            Some(Command::Export {
                platform: Platform::Windows,
                ..
            })
        ));
        assert!(matches!(
            dispatch_key(&mut app, key(KeyCode::Char('M'))),
            Some(Command::Export {
                platform: Platform::MacOs,
                ..
            })
        ));
    }

    #[test]
    fn import_prompt_returns_command() {
        let mut app = setup_app();
        dispatch_key(&mut app, key(KeyCode::Char('o')));
        type_str(&mut app, "favs.json");
        let command = dispatch_key(&mut app, key(KeyCode::Enter));
        assert_eq!(command, Some(Command::Import(PathBuf::from("favs.json"))));
    }

    #[test]
    fn help_opens_and_closes() {
        let mut app = setup_app();
        dispatch_key(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.mode, AppMode::Help);
        dispatch_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.help_state.scroll_offset, 1);
        dispatch_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn tab_toggles_preview() {
        let mut app = setup_app();
        let before = app.show_preview;
        dispatch_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.show_preview, !before);
    }

    #[tokio::test]
    async fn export_then_import_through_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let app = setup_app();
        let document =
            codec::export(Platform::Windows, &app.tree, &ExportSettings::default()).unwrap();
        let path = dir.path().join("nested").join("out.json");
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_command(
            Command::Export {
                platform: Platform::Windows,
                path: path.clone(),
                document,
            },
            tx.clone(),
        );
        match rx.recv().await {
            Some(Event::ExportFinished { result, .. }) => result.unwrap(),
            other => panic!("unexpected event: {other:?}"),
        }

        spawn_command(Command::Import(path.clone()), tx);
        match rx.recv().await {
            Some(Event::ImportFinished { path: read, result }) => {
                assert_eq!(read, path);
                let tree = result.unwrap();
                assert_eq!(tree.root_label(), "Corp");
                assert_eq!(tree.node_count(), 4);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn import_missing_file_reports_io_error() {
        let result = read_document(Path::new("/nonexistent/favs.json"), None).await;
        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
    }
}
