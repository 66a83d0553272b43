//! Background color value and `#RRGGBB` parsing.
//!
//! Channels are stored as `f32` in `[0, 1]`, the form PDF color operators
//! (`rg`, `RG`) take. Each channel is the integer value of its two-digit hex
//! pair divided by 255.

use crate::error::BackdropError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static RE_HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").unwrap()
});

/// An opaque 8-bit-per-channel RGB color, normalised to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Build a color from 8-bit channel values.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Parse a `#RRGGBB` string (hex digits in either case).
    ///
    /// Only the structure is checked; any 6-digit hex value is accepted.
    pub fn from_hex(input: &str) -> Result<Self, BackdropError> {
        let invalid = || BackdropError::InvalidColor {
            input: input.to_string(),
        };
        let caps = RE_HEX_COLOR.captures(input.trim()).ok_or_else(invalid)?;
        let channel = |i: usize| u8::from_str_radix(&caps[i], 16).map_err(|_| invalid());
        Ok(Self::from_u8(channel(1)?, channel(2)?, channel(3)?))
    }

    /// The channels as 8-bit values, rounded to nearest.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

impl FromStr for Rgb {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_u8();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn parses_channels_over_255() {
        let c = Rgb::from_hex("#1A2B3C").unwrap();
        assert!(close(c.r, 26.0 / 255.0));
        assert!(close(c.g, 43.0 / 255.0));
        assert!(close(c.b, 60.0 / 255.0));
    }

    #[test]
    fn parses_lowercase_and_extremes() {
        assert_eq!(Rgb::from_hex("#ffffff").unwrap(), Rgb::WHITE);
        let black = Rgb::from_hex("#000000").unwrap();
        assert_eq!((black.r, black.g, black.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "#", "FFFFFF", "#FFF", "#FFFFFFF", "#GG0000", "rgb(1,2,3)"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(BackdropError::InvalidColor { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn display_is_uppercase_hex() {
        let c: Rgb = "#1a2b3c".parse().unwrap();
        assert_eq!(c.to_string(), "#1A2B3C");
        assert_eq!(Rgb::default().to_string(), "#FFFFFF");
    }
}
