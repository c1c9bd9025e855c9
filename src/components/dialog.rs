use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::{AppMode, DialogKind, DialogState, InputField};
use crate::theme::ThemeColors;

/// Dialog widget that renders a centered modal overlay.
pub struct DialogWidget<'a> {
    mode: &'a AppMode,
    dialog_state: &'a DialogState,
    theme: &'a ThemeColors,
}

impl<'a> DialogWidget<'a> {
    pub fn new(mode: &'a AppMode, dialog_state: &'a DialogState, theme: &'a ThemeColors) -> Self {
        Self {
            mode,
            dialog_state,
            theme,
        }
    }

    /// Calculate a centered rectangle within the given area.
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let w = width.min(area.width);
        let h = height.min(area.height);
        Rect::new(x, y, w, h)
    }
}

impl<'a> Widget for DialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let AppMode::Dialog(kind) = self.mode else {
            return;
        };

        match kind {
            DialogKind::DeleteConfirm { name, .. } => {
                render_confirm_dialog(name, self.theme, area, buf);
            }
            DialogKind::Error { message } => {
                render_error_dialog(message, self.theme, area, buf);
            }
            _ => render_form_dialog(kind, self.dialog_state, self.theme, area, buf),
        }
    }
}

fn dialog_block<'b>(title: &str, border: ratatui::style::Color, theme: &ThemeColors) -> Block<'b> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.dialog_bg))
        .padding(Padding::horizontal(1))
}

fn hint_line(text: &str, theme: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(theme.dim_fg).add_modifier(Modifier::DIM),
    ))
}

fn render_form_dialog(
    kind: &DialogKind,
    state: &DialogState,
    theme: &ThemeColors,
    area: Rect,
    buf: &mut Buffer,
) {
    let labels = kind.field_labels();
    let dialog_width = 60.min(area.width.saturating_sub(4));
    // Two rows per field, one for the validation message, one for hints.
    let dialog_height = labels.len() as u16 * 2 + 4;
    let rect = DialogWidget::centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);
    let block = dialog_block(kind.title(), theme.dialog_border_fg, theme);
    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0) + 2;
    for (i, label) in labels.iter().enumerate() {
        let y = inner.y + i as u16 * 2;
        if y >= inner.y + inner.height {
            break;
        }
        let focused = i == state.focus;
        let label_style = if focused {
            Style::default()
                .fg(theme.accent_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim_fg)
        };
        let mut spans = vec![Span::styled(
            format!("{:<width$}", format!("{}:", label), width = label_width),
            label_style,
        )];
        if let Some(field) = state.fields.get(i) {
            let max_width = (inner.width as usize).saturating_sub(label_width);
            spans.extend(input_spans(field, focused, max_width, theme));
        }
        buf.set_line(inner.x, y, &Line::from(spans), inner.width);
    }

    if let Some(error) = &state.error {
        let y = inner.y + labels.len() as u16 * 2;
        if y < inner.y + inner.height {
            let line = Line::from(Span::styled(
                error.clone(),
                Style::default().fg(theme.error_fg),
            ));
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }

    let hint = if labels.len() > 1 {
        "[Enter] Confirm  [Tab] Next field  [Esc] Cancel"
    } else {
        "[Enter] Confirm  [Esc] Cancel"
    };
    if inner.height > 1 {
        buf.set_line(
            inner.x,
            inner.y + inner.height - 1,
            &hint_line(hint, theme),
            inner.width,
        );
    }
}

/// Text with a block cursor, scrolled so the cursor stays visible.
fn input_spans(
    field: &InputField,
    focused: bool,
    max_width: usize,
    theme: &ThemeColors,
) -> Vec<Span<'static>> {
    let input_style = Style::default().fg(theme.tree_fg);
    if !focused {
        return vec![Span::styled(field.text.clone(), input_style)];
    }

    let (before, cursor_char, after) = match field.text[field.cursor..].chars().next() {
        Some(c) => (
            &field.text[..field.cursor],
            c.to_string(),
            &field.text[field.cursor + c.len_utf8()..],
        ),
        None => (field.text.as_str(), " ".to_string(), ""),
    };

    // Drop characters from the left if the cursor would fall off the edge.
    let budget = max_width.saturating_sub(1);
    let before_chars = before.chars().count();
    let before_display: String = if before_chars > budget {
        before.chars().skip(before_chars - budget).collect()
    } else {
        before.to_string()
    };

    let cursor_style = Style::default()
        .bg(theme.tree_fg)
        .fg(theme.dialog_bg)
        .add_modifier(Modifier::BOLD);

    vec![
        Span::styled(before_display, input_style),
        Span::styled(cursor_char, cursor_style),
        Span::styled(after.to_string(), input_style),
    ]
}

fn render_confirm_dialog(name: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (name.chars().count() as u16 + 10)
        .max(40)
        .min(area.width.saturating_sub(4));
    let rect = DialogWidget::centered_rect(dialog_width, 7, area);

    Clear.render(rect, buf);
    let block = dialog_block("Delete Confirmation", theme.error_fg, theme);
    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let header = Line::from(Span::styled(
        "Delete this entry and everything inside it?",
        Style::default()
            .fg(theme.warning_fg)
            .add_modifier(Modifier::BOLD),
    ));
    buf.set_line(inner.x, inner.y, &header, inner.width);

    if inner.height > 2 {
        let target = Line::from(Span::styled(
            format!("  • {}", name),
            Style::default().fg(theme.tree_fg),
        ));
        buf.set_line(inner.x, inner.y + 2, &target, inner.width);
    }

    buf.set_line(
        inner.x,
        inner.y + inner.height - 1,
        &hint_line("[y] Yes  [n/Esc] Cancel", theme),
        inner.width,
    );
}

fn render_error_dialog(message: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (message.chars().count() as u16 + 6)
        .max(30)
        .min(area.width.saturating_sub(4));
    let rect = DialogWidget::centered_rect(dialog_width, 5, area);

    Clear.render(rect, buf);
    let block = dialog_block("Error", theme.error_fg, theme);
    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let msg_line = Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.error_fg),
    ));
    buf.set_line(inner.x, inner.y + inner.height / 2, &msg_line, inner.width);

    if inner.height > 1 {
        buf.set_line(
            inner.x,
            inner.y + inner.height - 1,
            &hint_line("[Enter/Esc] Dismiss", theme),
            inner.width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn render(mode: &AppMode, state: &DialogState) -> String {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        DialogWidget::new(mode, state, &tc).render(area, &mut buf);
        buffer_to_string(&buf, area)
    }

    #[test]
    fn test_link_dialog_renders_both_fields() {
        let mode = AppMode::Dialog(DialogKind::AddLink { parent: None });
        let state = DialogState {
            fields: vec![
                InputField::with_text("Mail"),
                InputField::with_text("https://mail.example"),
            ],
            focus: 1,
            error: None,
        };
        let content = render(&mode, &state);
        assert!(content.contains("Add Link"));
        assert!(content.contains("Name:"));
        assert!(content.contains("URL:"));
        assert!(content.contains("Mail"));
        assert!(content.contains("https://mail.example"));
        assert!(content.contains("[Tab] Next field"));
    }

    #[test]
    fn test_validation_error_shown() {
        let mode = AppMode::Dialog(DialogKind::AddFolder { parent: Some(vec![0]) });
        let state = DialogState {
            fields: vec![InputField::default()],
            focus: 0,
            error: Some("Name is required".to_string()),
        };
        let content = render(&mode, &state);
        assert!(content.contains("Add Subfolder"));
        assert!(content.contains("Name is required"));
    }

    #[test]
    fn test_confirm_dialog_renders() {
        let mode = AppMode::Dialog(DialogKind::DeleteConfirm {
            path: vec![1],
            name: "Docs".to_string(),
        });
        let content = render(&mode, &DialogState::default());
        assert!(content.contains("Delete"));
        assert!(content.contains("• Docs"));
        assert!(content.contains("[y] Yes"));
    }

    #[test]
    fn test_error_dialog_renders() {
        let mode = AppMode::Dialog(DialogKind::Error {
            message: "Format error: missing value".to_string(),
        });
        let content = render(&mode, &DialogState::default());
        assert!(content.contains("Error"));
        assert!(content.contains("missing value"));
    }

    #[test]
    fn test_long_input_keeps_cursor_visible() {
        let tc = theme::dark_theme();
        let field = InputField::with_text("x".repeat(100));
        let spans = input_spans(&field, true, 20, &tc);
        let shown: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        assert_eq!(shown, 20);
    }

    #[test]
    fn test_no_dialog_mode_noop() {
        let content = render(&AppMode::Normal, &DialogState::default());
        assert!(content.trim().is_empty());
    }

    fn buffer_to_string(buf: &Buffer, area: Rect) -> String {
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }
}
