//! RGBA colors stored as u8 components

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from parsing a color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 6 or 8 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digits in {0:?}")]
    BadDigit(String),
}

/// RGBA color stored as u8 components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Components as floats in 0.0..=1.0
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Components as f64 in 0.0..=1.0, for wgpu clear colors
    pub fn to_f64_array(self) -> [f64; 4] {
        let [r, g, b, a] = self.to_f32_array();
        [r as f64, g as f64, b as f64, a as f64]
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;

        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorError::BadLength(hex.len()));
        }
        if !hex.is_ascii() {
            return Err(ColorError::BadDigit(s.to_string()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::BadDigit(s.to_string()))
        };

        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rrggbb() {
        let c: Rgba = "#ff2d55".parse().unwrap();
        assert_eq!(c, Rgba::new(0xff, 0x2d, 0x55, 255));
        assert_eq!(c, Rgba::hex(0xff2d55));
    }

    #[test]
    fn test_parse_rrggbbaa() {
        let c: Rgba = "#00e5ff80".parse().unwrap();
        assert_eq!(c.a, 0x80);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("ff2d55".parse::<Rgba>(), Err(ColorError::MissingHash(_))));
        assert_eq!("#fff".parse::<Rgba>(), Err(ColorError::BadLength(3)));
        assert!(matches!("#gg0000".parse::<Rgba>(), Err(ColorError::BadDigit(_))));
    }

    #[test]
    fn test_display_matches_input() {
        assert_eq!(Rgba::hex(0x0f1115).to_string(), "#0f1115");
        assert_eq!(Rgba::hex(0x0f1115).with_alpha(0x40).to_string(), "#0f111540");
    }
}
