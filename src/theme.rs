//! Theme data model: built-in palettes and resolution from config.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tree panel
    pub tree_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub folder_fg: Color,
    pub link_fg: Color,
    pub url_fg: Color,
    pub marked_fg: Color,
    pub guide_fg: Color,

    // Preview panel
    pub preview_fg: Color,
    pub preview_key_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders
    pub border_fg: Color,
    pub border_focused_fg: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_border_fg: Color,

    // Semantic colors, not configurable
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),     // text
        selected_bg: Color::Rgb(69, 71, 90),    // surface1
        selected_fg: Color::Rgb(205, 214, 244), // text
        folder_fg: Color::Rgb(137, 180, 250),   // blue
        link_fg: Color::Rgb(205, 214, 244),     // text
        url_fg: Color::Rgb(116, 199, 236),      // sapphire
        marked_fg: Color::Rgb(250, 179, 135),   // peach
        guide_fg: Color::Rgb(88, 91, 112),      // surface2

        preview_fg: Color::Rgb(186, 194, 222),     // subtext1
        preview_key_fg: Color::Rgb(203, 166, 247), // mauve

        status_bg: Color::Rgb(30, 30, 46), // base
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112),
        border_focused_fg: Color::Rgb(137, 180, 250),

        dialog_bg: Color::Rgb(49, 50, 68), // surface0
        dialog_border_fg: Color::Rgb(137, 180, 250),

        error_fg: Color::Rgb(243, 139, 168),   // red
        warning_fg: Color::Rgb(249, 226, 175), // yellow
        success_fg: Color::Rgb(166, 227, 161), // green
        accent_fg: Color::Rgb(203, 166, 247),  // mauve
        dim_fg: Color::Rgb(108, 112, 134),     // overlay0
    }
}

/// Light theme using Catppuccin Latte.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),
        selected_bg: Color::Rgb(204, 208, 218),
        selected_fg: Color::Rgb(76, 79, 105),
        folder_fg: Color::Rgb(30, 102, 245),
        link_fg: Color::Rgb(76, 79, 105),
        url_fg: Color::Rgb(32, 159, 181),
        marked_fg: Color::Rgb(254, 100, 11),
        guide_fg: Color::Rgb(172, 176, 190),

        preview_fg: Color::Rgb(92, 95, 119),
        preview_key_fg: Color::Rgb(136, 57, 239),

        status_bg: Color::Rgb(239, 241, 245),
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190),
        border_focused_fg: Color::Rgb(30, 102, 245),

        dialog_bg: Color::Rgb(230, 233, 239),
        dialog_border_fg: Color::Rgb(30, 102, 245),

        error_fg: Color::Rgb(210, 15, 57),
        warning_fg: Color::Rgb(223, 142, 29),
        success_fg: Color::Rgb(64, 160, 43),
        accent_fg: Color::Rgb(136, 57, 239),
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse `"#aabbcc"` (hash optional) into a color. `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the runtime palette.
///
/// - `"dark"` (default) and unknown names: Mocha
/// - `"light"`: Latte
/// - `"custom"`: Mocha with `[theme.custom]` hex overrides
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("dark") {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        other => {
            if other != "dark" {
                log::warn!("unknown theme scheme {:?}, using dark", other);
            }
            dark_theme()
        }
    }
}

fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let overrides = [
        (&custom.folder_fg, &mut theme.folder_fg),
        (&custom.link_fg, &mut theme.link_fg),
        (&custom.url_fg, &mut theme.url_fg),
        (&custom.selected_bg, &mut theme.selected_bg),
        (&custom.marked_fg, &mut theme.marked_fg),
        (&custom.border_fg, &mut theme.border_fg),
        (&custom.status_bg, &mut theme.status_bg),
        (&custom.dialog_bg, &mut theme.dialog_bg),
    ];
    for (hex, slot) in overrides {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
