//! Pixel to glyph conversion.

use std::fmt;

use image::RgbImage;

use super::charset::glyph_for;
use super::grayscale::luminance;

/// RGB color carried by a colored glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One character cell of converted output.
///
/// A glyph with a color renders as an ANSI true-color (24-bit) foreground
/// escape followed by the character: `ESC[38;2;R;G;Bm<ch>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<CellColor>,
}

impl Glyph {
    /// A glyph without color.
    pub fn plain(ch: char) -> Self {
        Self { ch, color: None }
    }

    /// Whether this glyph carries a color escape.
    pub fn is_colored(&self) -> bool {
        self.color.is_some()
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.color {
            write!(f, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b)?;
        }
        write!(f, "{}", self.ch)
    }
}

/// Convert a resampled image to glyphs, one per pixel in row-major order.
///
/// Each pixel's BT.601 luminance selects a glyph from the density ramp.
/// With `colored`, every glyph also carries the pixel's RGB value.
/// `reversed` inverts brightness before the lookup.
///
/// # Returns
/// A vector of exactly `width * height` glyphs.
pub fn convert(img: &RgbImage, colored: bool, reversed: bool) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity((img.width() as usize) * (img.height() as usize));

    for pixel in img.pixels() {
        let [r, g, b] = pixel.0;
        let ch = glyph_for(luminance(r, g, b), reversed);
        let color = colored.then_some(CellColor { r, g, b });
        glyphs.push(Glyph { ch, color });
    }

    glyphs
}

/// Render glyphs as one flat stream, escape sequences included.
pub fn glyphs_to_string(glyphs: &[Glyph]) -> String {
    glyphs.iter().map(Glyph::to_string).collect()
}
