use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::theme::ThemeColors;

/// State for the help overlay.
#[derive(Debug, Default)]
pub struct HelpState {
    /// Scroll offset for the help content.
    pub scroll_offset: usize,
}

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
}

/// A category of keybindings.
struct KeyCategory {
    name: &'static str,
    entries: &'static [KeyEntry],
}

const NAVIGATION_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "j / ↓",
        description: "Move down",
    },
    KeyEntry {
        key: "k / ↑",
        description: "Move up",
    },
    KeyEntry {
        key: "g / Home",
        description: "Jump to first entry",
    },
    KeyEntry {
        key: "G / End",
        description: "Jump to last entry",
    },
];

const EDITING_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "F",
        description: "Add top-level folder",
    },
    KeyEntry {
        key: "L",
        description: "Add top-level link",
    },
    KeyEntry {
        key: "f",
        description: "Add subfolder to selected folder",
    },
    KeyEntry {
        key: "l",
        description: "Add link to selected folder",
    },
    KeyEntry {
        key: "e / Enter",
        description: "Edit selected entry",
    },
    KeyEntry {
        key: "d / Delete",
        description: "Delete selected entry",
    },
    KeyEntry {
        key: "r",
        description: "Edit root folder label",
    },
];

const MOVING_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "K",
        description: "Move entry up among siblings",
    },
    KeyEntry {
        key: "J",
        description: "Move entry down among siblings",
    },
    KeyEntry {
        key: "m",
        description: "Mark entry for moving",
    },
    KeyEntry {
        key: "p",
        description: "Place marked entry before selection",
    },
    KeyEntry {
        key: "i",
        description: "Place marked entry inside selected folder",
    },
    KeyEntry {
        key: "Esc",
        description: "Clear move mark",
    },
];

const IMPORT_EXPORT_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "o",
        description: "Import a Windows or macOS document",
    },
    KeyEntry {
        key: "W",
        description: "Export Windows Intune policy (.json)",
    },
    KeyEntry {
        key: "M",
        description: "Export macOS profile (.mobileconfig)",
    },
];

const GENERAL_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "Tab",
        description: "Toggle model preview",
    },
    KeyEntry {
        key: "PgUp / PgDn",
        description: "Scroll model preview",
    },
    KeyEntry {
        key: "?",
        description: "Toggle this help overlay",
    },
    KeyEntry {
        key: "q / Ctrl+C",
        description: "Quit",
    },
];

const CATEGORIES: &[KeyCategory] = &[
    KeyCategory {
        name: "Navigation",
        entries: NAVIGATION_KEYS,
    },
    KeyCategory {
        name: "Editing",
        entries: EDITING_KEYS,
    },
    KeyCategory {
        name: "Moving",
        entries: MOVING_KEYS,
    },
    KeyCategory {
        name: "Import / Export",
        entries: IMPORT_EXPORT_KEYS,
    },
    KeyCategory {
        name: "General",
        entries: GENERAL_KEYS,
    },
];

/// Help overlay widget showing all keybindings.
pub struct HelpOverlay<'a> {
    theme: &'a ThemeColors,
    scroll_offset: usize,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a ThemeColors, scroll_offset: usize) -> Self {
        Self {
            theme,
            scroll_offset,
        }
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled(" Keybinding Reference ", heading)),
            Line::from(""),
        ];

        for category in CATEGORIES {
            lines.push(Line::from(vec![
                Span::styled(format!("── {} ", category.name), heading),
                Span::styled("─".repeat(30), Style::default().fg(self.theme.dim_fg)),
            ]));

            for entry in category.entries {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<14}", entry.key),
                        Style::default()
                            .fg(self.theme.warning_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        entry.description.to_string(),
                        Style::default().fg(self.theme.tree_fg),
                    ),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            " Press ? or Esc to close ",
            Style::default().fg(self.theme.dim_fg),
        )));

        lines
    }

    /// Get total number of content lines (for scroll bounds).
    pub fn total_lines() -> usize {
        // title, blank, then header + entries + blank per category, then footer
        2 + CATEGORIES
            .iter()
            .map(|c| c.entries.len() + 2)
            .sum::<usize>()
            + 1
    }
}

impl<'a> Widget for HelpOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay_width = (area.width as f32 * 0.70).min(70.0) as u16;
        let overlay_height = (area.height as f32 * 0.80).min(44.0) as u16;

        let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
        let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused_fg))
            .style(Style::default().bg(self.theme.dialog_bg));

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let content_lines = self.build_content_lines();
        let visible_height = inner.height as usize;
        let scroll = self
            .scroll_offset
            .min(content_lines.len().saturating_sub(visible_height));

        for (i, line) in content_lines
            .iter()
            .skip(scroll)
            .take(visible_height)
            .enumerate()
        {
            buf.set_line(
                inner.x + 1,
                inner.y + i as u16,
                line,
                inner.width.saturating_sub(2),
            );
        }

        if content_lines.len() > visible_height && overlay_area.height > 0 {
            let total = content_lines.len();
            let indicator = format!(" {}/{} ", scroll + 1, total);
            let ind_span = Span::styled(indicator, Style::default().fg(self.theme.dim_fg));
            let ind_x = overlay_area.x
                + overlay_area
                    .width
                    .saturating_sub(ind_span.width() as u16 + 1);
            let ind_y = overlay_area.y + overlay_area.height - 1;
            buf.set_span(ind_x, ind_y, &ind_span, ind_span.width() as u16);
        }
    }
}
