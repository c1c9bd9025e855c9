use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::dialog::DialogWidget;
use crate::components::help::HelpOverlay;
use crate::components::preview::PreviewWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    app.clear_expired_status();

    let area = frame.area();
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let main_area = outer[0];
    let status_area = outer[1];

    let (tree_area, preview_area) = if app.show_preview {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_area);
        (split[0], Some(split[1]))
    } else {
        (main_area, None)
    };

    // Keep the selection on screen (borders take two rows).
    app.update_scroll(tree_area.height.saturating_sub(2) as usize);

    let title = if app.dirty {
        format!(" {} * ", app.tree.root_label())
    } else {
        format!(" {} ", app.tree.root_label())
    };
    let tree_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focused_fg));
    let tree_widget = TreeWidget::new(&app.flat_items, app.selected_index, &app.theme)
        .scroll_offset(app.scroll_offset)
        .marked(app.move_source.as_deref())
        .block(tree_block);
    frame.render_widget(tree_widget, tree_area);

    if let Some(preview_area) = preview_area {
        let preview_block = Block::default()
            .title(" Export model ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border_fg));
        let preview = PreviewWidget::new(&app.preview_lines, &app.theme)
            .scroll_offset(app.preview_scroll)
            .block(preview_block);
        frame.render_widget(preview, preview_area);
    }

    let location = location_label(app);
    let info = info_label(app);
    let move_info = app
        .move_source
        .as_deref()
        .and_then(|path| app.tree.resolve(path))
        .map(|node| format!("[moving: {}]", node.name()));

    let mut status = StatusBarWidget::new(&location, &info, &app.theme);
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg, app.status_is_error);
    }
    if let Some(move_info) = &move_info {
        status = status.move_info(move_info);
    }
    frame.render_widget(status, status_area);

    match &app.mode {
        AppMode::Dialog(_) => {
            frame.render_widget(DialogWidget::new(&app.mode, &app.dialog_state, &app.theme), area);
        }
        AppMode::Help => {
            frame.render_widget(HelpOverlay::new(&app.theme, app.help_state.scroll_offset), area);
        }
        AppMode::Normal => {}
    }
}

/// Names from the top level down to the selected node.
fn location_label(app: &App) -> String {
    let Some(path) = app.selected_path() else {
        return app.tree.root_label().to_string();
    };
    let mut names = vec![app.tree.root_label().to_string()];
    for depth in 1..=path.len() {
        if let Some(node) = app.tree.resolve(&path[..depth]) {
            names.push(node.name().to_string());
        }
    }
    names.join(" / ")
}

fn info_label(app: &App) -> String {
    let count = app.tree.node_count();
    let noun = if count == 1 { "entry" } else { "entries" };
    match &app.source_file {
        Some(file) => format!("{} {} · {}", count, noun, file.display()),
        None => format!("{} {}", count, noun),
    }
}
