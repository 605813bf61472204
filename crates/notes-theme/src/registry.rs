//! Bundled themes and name-based lookup
//!
//! The theme set is closed. Lookups by a name that is not in the set
//! resolve to [`DEFAULT_THEME`], so a stale or corrupted theme name in saved
//! state can never keep the editor from opening.

use std::fmt;
use std::str::FromStr;

use crate::color::Rgba;

/// Visual palette for the editor and its glitch overlay
#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Window background
    pub background: Rgba,
    /// Text color
    pub foreground: Rgba,
    pub accent: Rgba,
    /// Background of the text area itself
    pub text_background: Rgba,
    pub caret: Rgba,
    pub selection_background: Rgba,
    /// Colors the overlay samples from; never empty
    pub glitch_colors: &'static [Rgba],
}

/// Dark theme - the default
pub const DARK: Theme = Theme {
    name: "Dark",
    background: Rgba::hex(0x0f1115),
    foreground: Rgba::hex(0xe6e6e6),
    accent: Rgba::hex(0x7aa2f7),
    text_background: Rgba::hex(0x0f1115),
    caret: Rgba::hex(0x7aa2f7),
    selection_background: Rgba::hex(0x1f2335),
    glitch_colors: &[Rgba::hex(0xff2d55), Rgba::hex(0x00e5ff), Rgba::hex(0xffd400)],
};

pub const LIGHT: Theme = Theme {
    name: "Light",
    background: Rgba::hex(0xfafafa),
    foreground: Rgba::hex(0x0f1115),
    accent: Rgba::hex(0x3a5ccc),
    text_background: Rgba::hex(0xffffff),
    caret: Rgba::hex(0x3a5ccc),
    selection_background: Rgba::hex(0xe7ecff),
    glitch_colors: &[Rgba::hex(0xff4d4f), Rgba::hex(0x36cfc9), Rgba::hex(0xfadb14)],
};

/// Near-black background with a fourth (green) glitch channel
pub const DARK_GLITCH: Theme = Theme {
    name: "Dark Glitch",
    background: Rgba::hex(0x05060a),
    foreground: Rgba::hex(0xd7dae0),
    accent: Rgba::hex(0xff2d55),
    text_background: Rgba::hex(0x05060a),
    caret: Rgba::hex(0xff2d55),
    selection_background: Rgba::hex(0x141623),
    glitch_colors: &[
        Rgba::hex(0xff2d55),
        Rgba::hex(0x06d6a0),
        Rgba::hex(0x00e5ff),
        Rgba::hex(0xffd400),
    ],
};

/// Theme used for unknown or missing names
pub const DEFAULT_THEME: &Theme = &DARK;

/// The closed set of theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeName {
    Dark,
    Light,
    DarkGlitch,
}

impl ThemeName {
    /// All themes in menu order
    pub const ALL: [ThemeName; 3] = [ThemeName::Dark, ThemeName::Light, ThemeName::DarkGlitch];

    pub fn as_str(self) -> &'static str {
        self.theme().name
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            ThemeName::Dark => &DARK,
            ThemeName::Light => &LIGHT,
            ThemeName::DarkGlitch => &DARK_GLITCH,
        }
    }
}

impl FromStr for ThemeName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a theme by name, falling back to the default theme
pub fn resolve(name: &str) -> &'static Theme {
    match name.parse::<ThemeName>() {
        Ok(theme) => theme.theme(),
        Err(()) => {
            log::debug!("Unknown theme {:?}, using {}", name, DEFAULT_THEME.name);
            DEFAULT_THEME
        }
    }
}

/// List all theme names in menu order
pub fn theme_names() -> Vec<&'static str> {
    ThemeName::ALL.iter().map(|t| t.as_str()).collect()
}

/// Theme after `current` in menu order, wrapping around
///
/// Unknown names are treated as the default theme.
pub fn next_theme(current: &str) -> &'static str {
    let current = resolve(current).name;
    let idx = ThemeName::ALL
        .iter()
        .position(|t| t.as_str() == current)
        .unwrap_or(0);
    ThemeName::ALL[(idx + 1) % ThemeName::ALL.len()].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_themes() {
        assert_eq!(resolve("Dark").name, "Dark");
        assert_eq!(resolve("Light").name, "Light");
        assert_eq!(resolve("Dark Glitch").name, "Dark Glitch");
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(resolve("NonexistentTheme"), resolve("Dark"));
        assert_eq!(resolve(""), DEFAULT_THEME);
        // Lookup is exact, not case-insensitive
        assert_eq!(resolve("dark glitch").name, "Dark");
    }

    #[test]
    fn test_dark_glitch_colors() {
        let expected: Vec<Rgba> = ["#ff2d55", "#00e5ff", "#ffd400"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(resolve("Dark").glitch_colors, expected.as_slice());
    }

    #[test]
    fn test_every_theme_has_glitch_colors() {
        for name in ThemeName::ALL {
            assert!(!name.theme().glitch_colors.is_empty(), "{name} has no glitch colors");
        }
    }

    #[test]
    fn test_theme_names_round_trip() {
        for name in theme_names() {
            let parsed: ThemeName = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
        assert!("Solarized".parse::<ThemeName>().is_err());
    }

    #[test]
    fn test_next_theme_cycles() {
        assert_eq!(next_theme("Dark"), "Light");
        assert_eq!(next_theme("Light"), "Dark Glitch");
        assert_eq!(next_theme("Dark Glitch"), "Dark");
        assert_eq!(next_theme("bogus"), "Light");
    }
}
