//! RGB to grayscale conversion using ITU-R BT.601 luminance formula.

/// Luminance of a single RGB sample.
///
/// The luminance formula is: Y = 0.299*R + 0.587*G + 0.114*B
///
/// Uses integer math with the coefficients scaled by 1000
/// (299 + 587 + 114 = 1000), so pure white maps exactly to 255.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let luminance = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
    luminance as u8
}
