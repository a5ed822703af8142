//! RGB color handling with hex parsing and the display color resolution rules.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_COLOR;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Supports parsing from hex strings ("#rrggbb" and the short "#rgb" form)
/// and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#rrggbb", "rrggbb", and the short form "#rgb"
    /// (expanded digit-wise, so "#abc" parses as "#aabbcc").
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        let expanded;
        let hex = match hex.len() {
            6 => hex,
            3 => {
                expanded = hex
                    .chars()
                    .flat_map(|c| [c, c])
                    .collect::<String>();
                expanded.as_str()
            }
            _ => anyhow::bail!(
                "Invalid hex color format '{hex}'. Expected 6 or 3 hex digits"
            ),
        };

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#rrggbb" (lowercase).
    ///
    /// Lowercase matches the colors already present in device menu files.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Converts the color to a Ratatui color for terminal rendering.
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    /// Returns the color with each channel divided by `factor` and floored.
    ///
    /// A factor greater than 1 darkens; factors between 0 and 1 brighten, with
    /// channels clamped to 255. The caller is responsible for screening out
    /// non-positive or non-finite factors.
    #[must_use]
    pub fn darken(&self, factor: f64) -> Self {
        let adjust = |channel: u8| (f64::from(channel) / factor).floor().clamp(0.0, 255.0) as u8;
        Self {
            r: adjust(self.r),
            g: adjust(self.g),
            b: adjust(self.b),
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Returns true if `value` is a hex color string: '#' followed by exactly
/// 6 or 3 hex digits.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Derives a node's display color from its parent's color and an optional
/// darkening factor.
///
/// Rules, in order:
/// - no parent color (absent or empty) resolves to the default gray;
/// - a missing, non-finite, or non-positive factor leaves the parent color
///   unchanged;
/// - a parent color that is not a hex color string is returned unchanged;
/// - otherwise each channel is divided by the factor, floored, and clamped.
#[must_use]
pub fn resolve_color(parent_color: Option<&str>, factor: Option<f64>) -> String {
    let Some(parent) = parent_color.filter(|c| !c.is_empty()) else {
        return DEFAULT_COLOR.to_string();
    };

    let factor = factor.filter(|f| f.is_finite() && *f > 0.0);
    let (Some(factor), true) = (factor, is_hex_color(parent)) else {
        return parent.to_string();
    };

    match RgbColor::from_hex(parent) {
        Ok(color) => color.darken(factor).to_hex(),
        Err(_) => parent.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#ff0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("  #ffffff  ").unwrap();
        assert_eq!(color, RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_from_hex_short_form() {
        let color = RgbColor::from_hex("#abc").unwrap();
        assert_eq!(color, RgbColor::from_hex("#aabbcc").unwrap());

        let color = RgbColor::from_hex("#f00").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#ffff").is_err());
        assert!(RgbColor::from_hex("#fffffff").is_err());
        assert!(RgbColor::from_hex("gggggg").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
    }

    #[test]
    fn test_to_hex_lowercase() {
        let color = RgbColor::new(255, 0, 0);
        assert_eq!(color.to_hex(), "#ff0000");

        let color = RgbColor::new(0, 128, 255);
        assert_eq!(color.to_hex(), "#0080ff");
    }

    #[test]
    fn test_roundtrip() {
        let original = RgbColor::new(123, 45, 67);
        let parsed = RgbColor::from_hex(&original.to_hex()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_darken_halves_channels() {
        let color = RgbColor::new(200, 100, 50);
        assert_eq!(color.darken(2.0), RgbColor::new(100, 50, 25));
    }

    #[test]
    fn test_darken_floors() {
        // 255 / 2 = 127.5, floored to 127
        let color = RgbColor::new(255, 255, 255);
        assert_eq!(color.darken(2.0), RgbColor::new(127, 127, 127));
    }

    #[test]
    fn test_darken_brighten_clamps() {
        let color = RgbColor::new(200, 200, 200);
        assert_eq!(color.darken(0.5), RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#aabbcc"));
        assert!(is_hex_color("#abc"));
        assert!(is_hex_color("#AABBCC"));
        assert!(!is_hex_color("aabbcc"));
        assert!(!is_hex_color("#aabbc"));
        assert!(!is_hex_color("#gggggg"));
        assert!(!is_hex_color(""));
    }

    #[test]
    fn test_resolve_color_darkens() {
        assert_eq!(resolve_color(Some("#c86432"), Some(2.0)), "#643219");
    }

    #[test]
    fn test_resolve_color_no_parent_is_gray() {
        assert_eq!(resolve_color(None, Some(2.0)), "#cccccc");
        assert_eq!(resolve_color(Some(""), None), "#cccccc");
    }

    #[test]
    fn test_resolve_color_missing_factor_passes_through() {
        assert_eq!(resolve_color(Some("#aabbcc"), None), "#aabbcc");
    }

    #[test]
    fn test_resolve_color_nonpositive_factor_passes_through() {
        assert_eq!(resolve_color(Some("#aabbcc"), Some(0.0)), "#aabbcc");
        assert_eq!(resolve_color(Some("#aabbcc"), Some(-3.0)), "#aabbcc");
    }

    #[test]
    fn test_resolve_color_nonfinite_factor_passes_through() {
        assert_eq!(resolve_color(Some("#aabbcc"), Some(f64::NAN)), "#aabbcc");
        assert_eq!(
            resolve_color(Some("#aabbcc"), Some(f64::INFINITY)),
            "#aabbcc"
        );
    }

    #[test]
    fn test_resolve_color_invalid_parent_passes_through() {
        assert_eq!(resolve_color(Some("not-a-color"), Some(2.0)), "not-a-color");
        assert_eq!(resolve_color(Some("aabbcc"), Some(2.0)), "aabbcc");
    }

    #[test]
    fn test_resolve_color_short_form_parent() {
        // "#fff" expands to "#ffffff" before darkening
        assert_eq!(resolve_color(Some("#fff"), Some(2.0)), "#7f7f7f");
    }

    #[test]
    fn test_resolve_color_channels_never_increase_for_darkening_factor() {
        let parent = RgbColor::from_hex("#b55468").unwrap();
        for factor in [1.0, 1.5, 2.0, 10.0] {
            let resolved = resolve_color(Some("#b55468"), Some(factor));
            let resolved = RgbColor::from_hex(&resolved).unwrap();
            assert!(resolved.r <= parent.r);
            assert!(resolved.g <= parent.g);
            assert!(resolved.b <= parent.b);
        }
    }
}
