//! Thematic styling: fixed palettes mapping score categories to colors.

mod color;
mod palette;

pub use color::{Rgb, FALLBACK_GRAY, INFERNO};
pub use palette::{resolve_color, resolve_color_by_name, ColorTheme};
