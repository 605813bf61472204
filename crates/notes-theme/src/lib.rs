//! DC404 Notes themes
//!
//! This crate provides:
//! - `Rgba` colors with `#rrggbb` parsing
//! - The fixed set of bundled themes
//! - Name-based lookup that never fails (unknown names fall back to `Dark`)

mod color;
mod registry;

pub use color::{ColorError, Rgba};
pub use registry::{
    DARK, DARK_GLITCH, DEFAULT_THEME, LIGHT, Theme, ThemeName, next_theme, resolve, theme_names,
};
