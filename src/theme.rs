use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five-color palettes indexed by activity level, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub light: [String; 5],
    pub dark: [String; 5],
}

impl Default for Theme {
    fn default() -> Self {
        github_theme()
    }
}

/// The fixed two-palette GitHub theme used when the caller supplies none.
pub fn github_theme() -> Theme {
    let hex = |s: &str| s.to_string();
    Theme {
        light: [
            hex("#ebedf0"),
            hex("#9be9a8"),
            hex("#40c463"),
            hex("#30a14e"),
            hex("#216e39"),
        ],
        dark: [
            hex("#161b22"),
            hex("#0e4429"),
            hex("#006d32"),
            hex("#26a641"),
            hex("#39d353"),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(format!("Invalid theme '{s}': expected 'light' or 'dark'")),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

impl Theme {
    pub fn palette(&self, mode: ThemeMode) -> &[String; 5] {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// RGB for a level under the given mode. Levels above 4 clamp to the
    /// darkest cell; unparseable palette entries fall back to grey.
    pub fn rgb(&self, level: u8, mode: ThemeMode) -> (u8, u8, u8) {
        let palette = self.palette(mode);
        let entry = &palette[usize::from(level.min(4))];
        parse_hex(entry).unwrap_or((128, 128, 128))
    }
}

/// Parse `#rrggbb` into an RGB triple.
pub fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.strip_prefix('#')?;
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Nearest cell in the 6x6x6 ANSI-256 color cube, for terminals where the
/// console renderer cannot assume truecolor support.
pub fn ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    let scale = |c: u8| (u16::from(c) * 5 / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}
