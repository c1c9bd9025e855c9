use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " ?:help F/L:add e:edit d:del m:move W/M:export ";

/// Status bar: current location and counts on the left, key hints on the right.
/// A transient status message replaces the whole bar.
pub struct StatusBarWidget<'a> {
    location: &'a str,
    info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    move_info: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(location: &'a str, info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            location,
            info,
            theme,
            status_message: None,
            is_error: false,
            move_info: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    /// Shown while a node is marked for moving.
    pub fn move_info(mut self, info: &'a str) -> Self {
        self.move_info = Some(info);
        self
    }
}

/// Truncate to at most `max` characters, keeping the tail.
fn tail(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let kept: String = s.chars().skip(count - (max - 3)).collect();
    format!("...{}", kept)
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        buf.set_style(
            Rect::new(area.x, area.y, area.width, 1),
            Style::default().bg(self.theme.status_bg),
        );

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .bg(self.theme.status_bg)
                    .fg(self.theme.success_fg)
            };
            let display: String = msg.chars().take(width).collect();
            let display = format!("{:<width$}", display, width = width);
            buf.set_line(area.x, area.y, &Line::from(Span::styled(display, style)), area.width);
            return;
        }

        let hints_len = KEY_HINTS.chars().count();
        let move_len = self.move_info.map(|m| m.chars().count() + 1).unwrap_or(0);
        let remaining = width.saturating_sub(hints_len + move_len);

        let info_display = tail(self.info, remaining);
        let location_budget = remaining
            .saturating_sub(info_display.chars().count())
            .saturating_sub(1);
        let location_display = tail(self.location, location_budget);
        let gap = remaining
            .saturating_sub(location_display.chars().count())
            .saturating_sub(info_display.chars().count());

        let base = Style::default().bg(self.theme.status_bg);
        let mut spans = vec![
            Span::styled(location_display, base.fg(self.theme.status_fg)),
            Span::styled(" ".repeat(gap), base),
            Span::styled(info_display, base.fg(self.theme.accent_fg)),
        ];

        if let Some(info) = self.move_info {
            spans.push(Span::styled(" ", base));
            spans.push(Span::styled(
                info.to_string(),
                base.fg(self.theme.marked_fg).add_modifier(Modifier::BOLD),
            ));
        }

        if width > hints_len {
            spans.push(Span::styled(
                KEY_HINTS,
                base.fg(self.theme.dim_fg).add_modifier(Modifier::DIM),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn line(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn test_normal_bar_shows_location_info_and_hints() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("Work / Mail", "3 folders, 5 links", &tc).render(area, &mut buf);
        let content = line(&buf, 100);
        assert!(content.starts_with("Work / Mail"));
        assert!(content.contains("3 folders, 5 links"));
        assert!(content.contains("?:help"));
    }

    #[test]
    fn test_status_message_replaces_bar() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("Work", "info", &tc)
            .status_message("Exported to out.json", false)
            .render(area, &mut buf);
        let content = line(&buf, 60);
        assert!(content.contains("Exported to out.json"));
        assert!(!content.contains("?:help"));
    }

    #[test]
    fn test_error_message_uses_error_background() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("", "", &tc)
            .status_message("Import failed", true)
            .render(area, &mut buf);
        assert_eq!(buf.cell((0, 0)).unwrap().bg, tc.error_fg);
    }

    #[test]
    fn test_move_info_shown() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("Docs", "", &tc)
            .move_info("[moving: Docs]")
            .render(area, &mut buf);
        assert!(line(&buf, 100).contains("[moving: Docs]"));
    }

    #[test]
    fn test_long_location_truncated_from_left() {
        assert_eq!(tail("abcdefghij", 7), "...ghij");
        assert_eq!(tail("short", 10), "short");
        assert_eq!(tail("Ünïcødé names", 5), "...es");
    }

    #[test]
    fn test_narrow_bar_does_not_panic() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("a very long location", "and info", &tc).render(area, &mut buf);
    }
}
