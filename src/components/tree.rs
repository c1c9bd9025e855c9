use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::FlatItem;
use crate::theme::ThemeColors;

/// Favorites tree drawn with box-drawing guides.
pub struct TreeWidget<'a> {
    items: &'a [FlatItem],
    selected: usize,
    scroll_offset: usize,
    marked: Option<&'a [usize]>,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(items: &'a [FlatItem], selected: usize, theme: &'a ThemeColors) -> Self {
        Self {
            items,
            selected,
            scroll_offset: 0,
            marked: None,
            theme,
            block: None,
        }
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Highlight the node waiting to be moved.
    pub fn marked(mut self, path: Option<&'a [usize]>) -> Self {
        self.marked = path;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Guide prefix for the row at `index`: one column per ancestor, then the
    /// row's own connector.
    fn build_prefix(items: &[FlatItem], index: usize) -> String {
        let item = &items[index];
        let mut prefix = String::new();

        for depth in 0..item.depth {
            // Nearest row above at this depth is the ancestor.
            let ancestor_is_last = items[..index]
                .iter()
                .rev()
                .find(|row| row.depth == depth)
                .is_some_and(|row| row.is_last_sibling);
            prefix.push_str(if ancestor_is_last { "   " } else { "│  " });
        }

        prefix.push_str(if item.is_last_sibling { "└─ " } else { "├─ " });
        prefix
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.items.is_empty() {
            let hint = Line::from(Span::styled(
                "No favorites yet. F adds a folder, L a link, o imports a file.",
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(inner.x, inner.y, &hint, inner.width);
            return;
        }

        let rows = self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(inner.height as usize);

        for (row, (index, item)) in rows.enumerate() {
            let y = inner.y + row as u16;
            let is_selected = index == self.selected;
            let is_marked = self.marked == Some(item.path.as_slice());

            let guide_style = Style::default().fg(self.theme.guide_fg);
            let name_style = if is_marked {
                Style::default()
                    .fg(self.theme.marked_fg)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC)
            } else if item.is_folder {
                Style::default()
                    .fg(self.theme.folder_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.link_fg)
            };

            let mut spans = vec![Span::styled(Self::build_prefix(self.items, index), guide_style)];
            if is_marked {
                spans.push(Span::styled("» ", name_style));
            }
            if item.is_folder {
                spans.push(Span::styled(format!("▾ {}", item.name), name_style));
                spans.push(Span::styled(
                    format!(" ({})", item.child_count),
                    Style::default().fg(self.theme.dim_fg),
                ));
            } else {
                spans.push(Span::styled(format!("• {}", item.name), name_style));
                if let Some(url) = &item.url {
                    spans.push(Span::styled(
                        format!("  {}", url),
                        Style::default().fg(self.theme.url_fg),
                    ));
                }
            }

            let mut line = Line::from(spans);
            if is_selected {
                line = line.patch_style(
                    Style::default()
                        .bg(self.theme.selected_bg)
                        .add_modifier(Modifier::BOLD),
                );
                // Fill the row so the highlight spans the panel.
                buf.set_style(
                    Rect::new(inner.x, y, inner.width, 1),
                    Style::default().bg(self.theme.selected_bg),
                );
            }
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::flatten;
    use crate::favorites::{FavoritesTree, Node};
    use crate::theme;

    fn sample_items() -> Vec<FlatItem> {
        flatten(&FavoritesTree::from_parts(
            "R",
            vec![
                Node::folder_with(
                    "Work",
                    vec![
                        Node::folder_with("Tools", vec![Node::link("CI", "https://ci")]),
                        Node::link("Mail", "https://mail"),
                    ],
                ),
                Node::link("Docs", "https://docs"),
            ],
        ))
    }

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn prefixes_follow_sibling_structure() {
        let items = sample_items();
        assert_eq!(TreeWidget::build_prefix(&items, 0), "├─ ");
        assert_eq!(TreeWidget::build_prefix(&items, 1), "│  ├─ ");
        assert_eq!(TreeWidget::build_prefix(&items, 2), "│  │  └─ ");
        assert_eq!(TreeWidget::build_prefix(&items, 3), "│  └─ ");
        assert_eq!(TreeWidget::build_prefix(&items, 4), "└─ ");
    }

    #[test]
    fn renders_names_urls_and_counts() {
        let items = sample_items();
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        TreeWidget::new(&items, 0, &tc).render(area, &mut buf);

        assert!(row(&buf, 0, 50).contains("Work (2)"));
        assert!(row(&buf, 3, 50).contains("Mail"));
        assert!(row(&buf, 3, 50).contains("https://mail"));
        assert_eq!(buf.cell((0, 0)).unwrap().bg, tc.selected_bg);
        assert_ne!(buf.cell((0, 1)).unwrap().bg, tc.selected_bg);
    }

    #[test]
    fn marked_row_has_marker() {
        let items = sample_items();
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        let marked = vec![1usize];
        TreeWidget::new(&items, 0, &tc)
            .marked(Some(marked.as_slice()))
            .render(area, &mut buf);
        assert!(row(&buf, 4, 50).contains("» • Docs"));
    }

    #[test]
    fn scroll_offset_skips_rows() {
        let items = sample_items();
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 50, 2);
        let mut buf = Buffer::empty(area);
        TreeWidget::new(&items, 3, &tc)
            .scroll_offset(3)
            .render(area, &mut buf);
        assert!(row(&buf, 0, 50).contains("Mail"));
        assert!(row(&buf, 1, 50).contains("Docs"));
    }

    #[test]
    fn empty_tree_shows_hint() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 70, 3);
        let mut buf = Buffer::empty(area);
        TreeWidget::new(&[], 0, &tc).render(area, &mut buf);
        assert!(row(&buf, 0, 70).contains("No favorites yet"));
    }

    #[test]
    fn zero_area_does_not_panic() {
        let items = sample_items();
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        TreeWidget::new(&items, 0, &tc).render(area, &mut buf);
    }
}
