//! Display colors.

use std::fmt;

use serde::{Serialize, Serializer};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Build from a packed 0xRRGGBB literal.
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Parse "#rrggbb" or "rrggbb".
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.is_ascii() { return None }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase CSS hex form, e.g. "#440154".
    #[inline]
    pub fn hex(&self) -> String { self.to_string() }
}

impl fmt::Display for Rgb {
    /// Format as CSS: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Neutral gray used whenever a color cannot be resolved.
pub const FALLBACK_GRAY: Rgb = Rgb::from_u32(0x808080);

/// Plotly's sequential Inferno scale, dark to light.
pub const INFERNO: [Rgb; 10] = [
    Rgb::from_u32(0x000004),
    Rgb::from_u32(0x1b0c41),
    Rgb::from_u32(0x4a0c6b),
    Rgb::from_u32(0x781c6d),
    Rgb::from_u32(0xa52c60),
    Rgb::from_u32(0xcf4446),
    Rgb::from_u32(0xed6925),
    Rgb::from_u32(0xfb9b06),
    Rgb::from_u32(0xf7d13d),
    Rgb::from_u32(0xfcffa4),
];
