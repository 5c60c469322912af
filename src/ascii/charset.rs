//! Density ramp used to pick a glyph for a brightness level.

/// ASCII density ramp (10 levels).
/// Characters ordered from darkest (space) to brightest (@).
/// Works well on dark terminals.
pub const DENSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Map a brightness value (0-255) to a glyph from [`DENSITY_RAMP`].
///
/// Lower brightness maps to earlier (sparser) characters, higher brightness
/// to later (denser) ones. `reversed` inverts brightness first, for light
/// terminal backgrounds.
#[inline]
pub fn glyph_for(brightness: u8, reversed: bool) -> char {
    let b = if reversed { 255 - brightness } else { brightness };
    let levels = DENSITY_RAMP.len();
    let idx = (b as usize * (levels - 1)) / 255;
    DENSITY_RAMP[idx]
}
