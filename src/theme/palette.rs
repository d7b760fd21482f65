use std::{fmt, str::FromStr};

use anyhow::{anyhow, Error};
use serde::Serialize;

use crate::score::ScoreCategory;
use crate::theme::{Rgb, FALLBACK_GRAY};

/// A named five-color palette, one color per category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ColorTheme {
    #[default]
    Viridis,
    YlGnBu,
    Magma,
    Neptunes,
    #[serde(rename = "Hot-Cold")]
    HotCold,
}

/// Palette colors, indexed by category rank (Excellent first).
const PALETTES: [(ColorTheme, [Rgb; 5]); 5] = [
    (ColorTheme::Viridis, [
        Rgb::from_u32(0x440154),
        Rgb::from_u32(0x3b528b),
        Rgb::from_u32(0x21908d),
        Rgb::from_u32(0x5ec962),
        Rgb::from_u32(0xfde725),
    ]),
    (ColorTheme::YlGnBu, [
        Rgb::from_u32(0x081d58),
        Rgb::from_u32(0x225ea8),
        Rgb::from_u32(0x41b6c4),
        Rgb::from_u32(0x7fcdbb),
        Rgb::from_u32(0xffffd9),
    ]),
    (ColorTheme::Magma, [
        Rgb::from_u32(0x000004),
        Rgb::from_u32(0x3b0f70),
        Rgb::from_u32(0x8c2981),
        Rgb::from_u32(0xde4968),
        Rgb::from_u32(0xfcfdbf),
    ]),
    (ColorTheme::Neptunes, [
        Rgb::from_u32(0x07592e),
        Rgb::from_u32(0x1e8b7a),
        Rgb::from_u32(0x23b190),
        Rgb::from_u32(0x9fc5e8),
        Rgb::from_u32(0xffffd9),
    ]),
    (ColorTheme::HotCold, [
        Rgb::from_u32(0x436b88),
        Rgb::from_u32(0xb0dac2),
        Rgb::from_u32(0xe6cc84),
        Rgb::from_u32(0xee923c),
        Rgb::from_u32(0xd13728),
    ]),
];

impl ColorTheme {
    /// Selector order.
    pub const ALL: [ColorTheme; 5] = [
        ColorTheme::Viridis,
        ColorTheme::YlGnBu,
        ColorTheme::Magma,
        ColorTheme::Neptunes,
        ColorTheme::HotCold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Viridis => "Viridis",
            ColorTheme::YlGnBu => "YlGnBu",
            ColorTheme::Magma => "Magma",
            ColorTheme::Neptunes => "Neptunes",
            ColorTheme::HotCold => "Hot-Cold",
        }
    }

    /// Look up a theme by name, ignoring case and separators.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = |s: &str| -> String {
            s.chars().filter(|c| c.is_ascii_alphanumeric()).map(|c| c.to_ascii_lowercase()).collect()
        };
        let wanted = key(name);
        Self::ALL.into_iter().find(|theme| key(theme.name()) == wanted)
    }

    /// The theme's palette, Excellent first.
    pub fn palette(self) -> Option<&'static [Rgb; 5]> {
        PALETTES.iter()
            .find(|(theme, _)| *theme == self)
            .map(|(_, palette)| palette)
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorTheme {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::from_name(input).ok_or_else(|| anyhow!(
            "unknown color theme {input:?}; expected one of {}",
            Self::ALL.map(|t| t.name()).join(", "),
        ))
    }
}

/// Color for a category under a theme. Falls back to gray if the theme has no palette entry.
pub fn resolve_color(category: ScoreCategory, theme: ColorTheme) -> Rgb {
    theme.palette()
        .and_then(|palette| palette.get(category.rank()))
        .copied()
        .unwrap_or(FALLBACK_GRAY)
}

/// String-keyed variant of [`resolve_color`] for labels coming straight from user input.
/// Any unrecognized theme or category resolves to gray instead of failing.
pub fn resolve_color_by_name(category: &str, theme: &str) -> Rgb {
    match (ScoreCategory::from_label(category), ColorTheme::from_name(theme)) {
        (Some(category), Some(theme)) => resolve_color(category, theme),
        _ => FALLBACK_GRAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScoreCategory::*;

    #[test]
    fn viridis_excellent() {
        assert_eq!(resolve_color(Excellent, ColorTheme::Viridis).to_string(), "#440154");
        assert_eq!(resolve_color(VeryPoor, ColorTheme::Viridis).to_string(), "#fde725");
    }

    #[test]
    fn every_theme_is_total() {
        for theme in ColorTheme::ALL {
            assert!(theme.palette().is_some(), "{theme} has no palette");
            for category in ScoreCategory::ALL {
                assert_ne!(resolve_color(category, theme), FALLBACK_GRAY);
            }
        }
    }

    #[test]
    fn selected_palette_entries() {
        assert_eq!(resolve_color(Good, ColorTheme::YlGnBu).to_string(), "#225ea8");
        assert_eq!(resolve_color(Moderate, ColorTheme::Magma).to_string(), "#8c2981");
        assert_eq!(resolve_color(Poor, ColorTheme::Neptunes).to_string(), "#9fc5e8");
        assert_eq!(resolve_color(VeryPoor, ColorTheme::HotCold).to_string(), "#d13728");
    }

    #[test]
    fn unknown_names_fall_back_to_gray() {
        assert_eq!(resolve_color_by_name("Excellent", "Plasma"), FALLBACK_GRAY);
        assert_eq!(resolve_color_by_name("Superb", "Viridis"), FALLBACK_GRAY);
        assert_eq!(resolve_color_by_name("", ""), FALLBACK_GRAY);
        assert_eq!(resolve_color_by_name("Very Poor", "hot-cold").to_string(), "#d13728");
    }

    #[test]
    fn theme_names() {
        assert_eq!(ColorTheme::from_name("hot cold"), Some(ColorTheme::HotCold));
        assert_eq!(ColorTheme::from_name("YLGNBU"), Some(ColorTheme::YlGnBu));
        assert!("Plasma".parse::<ColorTheme>().is_err());
        assert_eq!(ColorTheme::default(), ColorTheme::Viridis);
    }
}
