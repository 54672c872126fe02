use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Title bar, cursor marker, focused field border
    pub highlight: Color,
    /// Help line, completed titles, lowest priority
    pub dim: Color,
    /// Status bar, unfocused borders, detail labels
    pub secondary: Color,
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub tag_bg: Color,
    /// Per-tag foreground overrides, keyed by canonical tag
    pub tag_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Indexed(252),
            text_bright: Color::Indexed(15),
            highlight: Color::Indexed(205),
            dim: Color::Indexed(241),
            secondary: Color::Indexed(240),
            red: Color::Indexed(196),
            orange: Color::Indexed(214),
            yellow: Color::Indexed(226),
            green: Color::Indexed(82),
            cyan: Color::Indexed(117),
            tag_bg: Color::Indexed(236),
            tag_colors: HashMap::new(),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Apply `[ui.colors]` and `[ui.tag_colors]` on top of the defaults.
    /// Unknown names and malformed values are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring malformed color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "secondary" => theme.secondary = color,
                "red" => theme.red = color,
                "orange" => theme.orange = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "tag_bg" => theme.tag_bg = color,
                _ => {}
            }
        }

        for (tag, value) in &ui.tag_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tag_colors.insert(tag.clone(), color);
            }
        }

        theme
    }

    /// Color for a tag, falling back to the shared tag color
    pub fn tag_color(&self, tag: &str) -> Color {
        self.tag_colors.get(tag).copied().unwrap_or(self.cyan)
    }

    /// Glyph color for priorities 1-5. Unset priority has no glyph.
    pub fn priority_color(&self, priority: u8) -> Option<Color> {
        match priority {
            1 => Some(self.red),
            2 => Some(self.orange),
            3 => Some(self.yellow),
            4 => Some(self.cyan),
            5 => Some(self.dim),
            _ => None,
        }
    }
}
