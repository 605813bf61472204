//! Window geometry strings
//!
//! Session state stores window placement as an opaque `WIDTHxHEIGHT+X+Y`
//! string (offsets may be negative, e.g. `900x640-8+0`). Only the window
//! shell interprets it; anything unparseable is ignored.

use std::fmt;
use std::str::FromStr;

/// Window size and position in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

impl FromStr for WindowGeometry {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, rest) = s.trim().split_once('x').ok_or(())?;
        let width = width.parse().map_err(|_| ())?;

        // Height runs up to the sign of the x offset
        let sign_at = rest.find(['+', '-']).ok_or(())?;
        let height = rest[..sign_at].parse().map_err(|_| ())?;
        let offsets = &rest[sign_at..];

        // The y offset starts at the next sign after the x offset's own sign
        let skip = if offsets.starts_with("+-") { 2 } else { 1 };
        let split = offsets[skip..].find(['+', '-']).ok_or(())? + skip;
        let x = parse_offset(&offsets[..split])?;
        let y = parse_offset(&offsets[split..])?;

        if width == 0 || height == 0 {
            return Err(());
        }
        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }
}

/// Parse `+N`, `-N` or Tk's `+-N`
fn parse_offset(s: &str) -> Result<i32, ()> {
    let s = s.strip_prefix('+').unwrap_or(s);
    s.parse().map_err(|_| ())
}
