//! Color string helpers shared by the picker and the terminal UI.
//!
//! The sync engine treats colors as opaque strings; only the picker and the
//! renderers need to interpret them.

use csscolorparser::Color as CssColor;
use palette::Srgb;
use thiserror::Error;

/// Error returned when a color string cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': {reason}")]
pub struct ColorParseError {
    pub input: String,
    pub reason: String,
}

/// Parse any CSS color string into 8-bit sRGB plus an alpha in `0.0..=1.0`.
pub fn parse_color(input: &str) -> Result<(Srgb<u8>, f32), ColorParseError> {
    let css_color: CssColor = input.parse().map_err(|e| ColorParseError {
        input: input.to_string(),
        reason: format!("{e}"),
    })?;
    let [r, g, b, a] = css_color.to_rgba8();
    Ok((Srgb::new(r, g, b), f32::from(a) / 255.0))
}

/// Parse a color, dropping alpha. Used by renderers.
pub fn parse_rgb(input: &str) -> Option<Srgb<u8>> {
    parse_color(input).ok().map(|(rgb, _)| rgb)
}

/// Canonical picker serialization: uppercase `#RRGGBB`, with a trailing
/// `AA` pair only when the color is not fully opaque.
pub fn to_hexa(rgb: Srgb<u8>, alpha: f32) -> String {
    let mut hex = format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue);
    if alpha < 1.0 {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        hex.push_str(&format!("{a:02X}"));
    }
    hex
}

/// Whether dark text reads better than light text on `rgb`.
pub fn prefers_dark_text(rgb: Srgb<u8>) -> bool {
    let luminance =
        0.299 * f32::from(rgb.red) + 0.587 * f32::from(rgb.green) + 0.114 * f32::from(rgb.blue);
    luminance > 128.0
}
