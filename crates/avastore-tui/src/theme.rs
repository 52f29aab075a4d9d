use avastore_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub price: Color,
    pub selection: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        clinic_dark()
    }
}

/// Dark palette built around the clinic's teal
pub fn clinic_dark() -> Theme {
    Theme {
        background: Color::Rgb(0x12, 0x1a, 0x1f),
        surface: Color::Rgb(0x1c, 0x27, 0x2e),
        foreground: Color::Rgb(0xe6, 0xef, 0xf2),
        muted: Color::Rgb(0x7d, 0x8f, 0x98),
        accent: Color::Rgb(0x2f, 0xb5, 0xa8),
        price: Color::Rgb(0xf2, 0xc1, 0x4e),
        selection: Color::Rgb(0x24, 0x3b, 0x42),
        error: Color::Rgb(0xe5, 0x6b, 0x6f),
        success: Color::Rgb(0x8c, 0xc8, 0x6e),
    }
}

pub fn clinic_light() -> Theme {
    Theme {
        background: Color::Rgb(0xf7, 0xfa, 0xfa),
        surface: Color::Rgb(0xe8, 0xf0, 0xf0),
        foreground: Color::Rgb(0x1d, 0x2b, 0x31),
        muted: Color::Rgb(0x6b, 0x7c, 0x84),
        accent: Color::Rgb(0x13, 0x8a, 0x80),
        price: Color::Rgb(0xb3, 0x6b, 0x00),
        selection: Color::Rgb(0xcf, 0xe6, 0xe3),
        error: Color::Rgb(0xc0, 0x39, 0x2b),
        success: Color::Rgb(0x3d, 0x8b, 0x37),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config, falling back to clinic-dark
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "clinic-light" | "light" => clinic_light(),
        "clinic-dark" | "dark" => clinic_dark(),
        other => {
            tracing::warn!(theme = other, "Unknown theme, using clinic-dark");
            clinic_dark()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Apply user color overrides; invalid hex strings are ignored
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 9] = [
        (&overrides.background, &mut theme.background),
        (&overrides.surface, &mut theme.surface),
        (&overrides.foreground, &mut theme.foreground),
        (&overrides.muted, &mut theme.muted),
        (&overrides.accent, &mut theme.accent),
        (&overrides.price, &mut theme.price),
        (&overrides.selection, &mut theme.selection),
        (&overrides.error, &mut theme.error),
        (&overrides.success, &mut theme.success),
    ];

    for (hex, slot) in slots {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }

    theme
}

pub fn available_themes() -> Vec<&'static str> {
    vec!["clinic-dark", "clinic-light"]
}
