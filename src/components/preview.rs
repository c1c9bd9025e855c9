use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::theme::ThemeColors;

/// Read-only view of the pretty-printed export model.
pub struct PreviewWidget<'a> {
    lines: &'a [String],
    scroll_offset: usize,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(lines: &'a [String], theme: &'a ThemeColors) -> Self {
        Self {
            lines,
            scroll_offset: 0,
            theme,
            block: None,
        }
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    /// Split a JSON line so object keys get their own color.
    fn highlight(&self, raw: &'a str) -> Line<'a> {
        let text_style = Style::default().fg(self.theme.preview_fg);
        let trimmed = raw.trim_start();
        let indent = &raw[..raw.len() - trimmed.len()];

        if trimmed.starts_with('"') {
            if let Some(split) = trimmed.find("\": ") {
                let (key, rest) = trimmed.split_at(split + 1);
                return Line::from(vec![
                    Span::raw(indent),
                    Span::styled(key, Style::default().fg(self.theme.preview_key_fg)),
                    Span::styled(rest, text_style),
                ]);
            }
        }
        Line::from(Span::styled(raw, text_style))
    }
}

impl<'a> Widget for PreviewWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = self.block.clone() {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.lines.is_empty() {
            let line = Line::from(Span::styled(
                "No preview",
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let lines = self.lines;
        let start = self.scroll_offset.min(lines.len().saturating_sub(1));
        for (i, raw) in lines[start..]
            .iter()
            .take(inner.height as usize)
            .enumerate()
        {
            let line = self.highlight(raw);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use ratatui::widgets::Borders;

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    fn sample() -> Vec<String> {
        vec![
            "[".to_string(),
            "  {".to_string(),
            "    \"toplevel_name\": \"Corp\"".to_string(),
            "  }".to_string(),
            "]".to_string(),
        ]
    }

    #[test]
    fn test_empty_preview_shows_placeholder() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&[], &tc)
            .block(Block::default().borders(Borders::ALL).title(" Model "))
            .render(area, &mut buf);
        assert!(row(&buf, 1, 30).contains("No preview"));
    }

    #[test]
    fn test_keys_are_highlighted() {
        let tc = theme::dark_theme();
        let lines = sample();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&lines, &tc).render(area, &mut buf);

        assert!(row(&buf, 2, 40).contains("\"toplevel_name\": \"Corp\""));
        assert_eq!(buf.cell((5, 2)).unwrap().fg, tc.preview_key_fg);
        assert_eq!(buf.cell((25, 2)).unwrap().fg, tc.preview_fg);
    }

    #[test]
    fn test_scroll_offset() {
        let tc = theme::dark_theme();
        let lines = sample();
        let area = Rect::new(0, 0, 40, 2);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&lines, &tc)
            .scroll_offset(2)
            .render(area, &mut buf);
        assert!(row(&buf, 0, 40).contains("toplevel_name"));
        assert!(row(&buf, 1, 40).contains('}'));
    }

    #[test]
    fn test_scroll_past_end_shows_last_line() {
        let tc = theme::dark_theme();
        let lines = sample();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&lines, &tc)
            .scroll_offset(99)
            .render(area, &mut buf);
        assert!(row(&buf, 0, 10).starts_with(']'));
    }

    #[test]
    fn test_zero_area_no_panic() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&[], &tc).render(area, &mut buf);
    }
}
