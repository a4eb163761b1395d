use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A 24-bit color. Written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn from_hex(s: &str) -> Result<Self, GameError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GameError::InvalidColor(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| GameError::InvalidColor(s.to_string()))
        };

        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear interpolation towards `other`, rounding each channel.
    /// `ratio` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, ratio: f64) -> Rgb {
        let t = ratio.max(0.0).min(1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Scales brightness, the terminal stand-in for drawing at partial alpha on black.
    pub fn dim(self, factor: f64) -> Rgb {
        Rgb::BLACK.lerp(self, factor)
    }
}

impl TryFrom<String> for Rgb {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Gradient color for segment `index` of a body `len` segments long, head first.
pub fn segment_color(start: Rgb, end: Rgb, index: usize, len: usize) -> Rgb {
    let span = len.saturating_sub(1).max(1);
    start.lerp(end, index as f64 / span as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::from_hex("#4169e1").unwrap(), Rgb::new(0x41, 0x69, 0xe1));
        assert_eq!(Rgb::from_hex("FF6347").unwrap(), Rgb::new(255, 99, 71));
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_display_round_trips_through_hex() {
        let c = Rgb::new(0x8a, 0x2b, 0xe2);
        assert_eq!(c.to_string(), "#8a2be2");
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(100, 200, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(50, 150, 100));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn test_segment_gradient() {
        let start = Rgb::new(0, 0, 0);
        let end = Rgb::new(200, 200, 200);

        // single segment is drawn in the head color
        assert_eq!(segment_color(start, end, 0, 1), start);

        assert_eq!(segment_color(start, end, 0, 3), start);
        assert_eq!(segment_color(start, end, 1, 3), Rgb::new(100, 100, 100));
        assert_eq!(segment_color(start, end, 2, 3), end);
    }

    #[test]
    fn test_dim() {
        assert_eq!(Rgb::new(200, 100, 50).dim(0.5), Rgb::new(100, 50, 25));
    }
}
