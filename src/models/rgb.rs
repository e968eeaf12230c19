//! RGB colors for category tints, formatted as hex.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color value with hex string representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_uppercase() {
        assert_eq!(RgbColor::new(0x66, 0xbb, 0x6a).to_hex(), "#66BB6A");
        assert_eq!(RgbColor::new(0, 0, 0).to_string(), "#000000");
    }
}
