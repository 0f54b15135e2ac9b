use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// RGB colour with components in `[0, 1]`.
///
/// Serialises as a `#rrggbb` string, the same form the colour picker in the
/// parameter panel reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Packed `0xRRGGBB` value, rounding each channel.
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn scale(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SceneError::InvalidColor(s.to_owned()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| SceneError::InvalidColor(s.to_owned()))
    }
}

impl TryFrom<String> for Color {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_and_0x_forms() {
        let a: Color = "#0196ff".parse().unwrap();
        let b: Color = "0x0196ff".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), 0x0196ff);
        assert_eq!(a.to_string(), "#0196ff");
    }

    #[test]
    fn rejects_short_or_non_hex() {
        assert!("#fff".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&Color::from_hex(0xdc8874)).unwrap();
        assert_eq!(json, "\"#dc8874\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_hex(), 0xdc8874);
    }
}
