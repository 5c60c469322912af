//! Dimension derivation and resampling for aspect-ratio-correct rendering.

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// Terminal character cells are roughly twice as tall as they are wide.
///
/// When only one output dimension is requested, the other is derived from
/// the source aspect ratio and corrected by this factor: heights are halved,
/// widths are doubled.
pub const CHAR_CELL_CORRECTION: f64 = 0.5;

/// Largest grid side, in cells, that a render will produce.
pub const MAX_GRID_SIDE: u32 = 1000;

/// Derive output dimensions (in character cells) for a source image.
///
/// - Both `width` and `height` positive: used as-is, no aspect correction.
/// - Only `width`: `height = round(width / aspect * 0.5)`.
/// - Only `height`: `width = round(height * aspect * 2.0)`.
/// - Both zero: `None`, the caller asked for an unbounded render.
///
/// Every side is clamped to `1..=MAX_GRID_SIDE`, so an extreme aspect ratio
/// or an oversized request cannot blow up the resample buffer.
///
/// # Example
/// ```ignore
/// // A 200x100 (2:1) image rendered 40 cells wide is 10 rows tall
/// assert_eq!(derive_dimensions(200, 100, 40, 0), Some((40, 10)));
/// ```
pub fn derive_dimensions(
    src_width: u32,
    src_height: u32,
    width: u32,
    height: u32,
) -> Option<(u32, u32)> {
    let aspect = source_aspect(src_width, src_height);

    let (w, h) = match (width, height) {
        (0, 0) => return None,
        (w, 0) => (w, (w as f64 / aspect * CHAR_CELL_CORRECTION).round() as u32),
        (0, h) => ((h as f64 * aspect / CHAR_CELL_CORRECTION).round() as u32, h),
        (w, h) => (w, h),
    };

    Some((clamp_side(w), clamp_side(h)))
}

fn clamp_side(side: u32) -> u32 {
    side.clamp(1, MAX_GRID_SIDE)
}

/// Width / height of the source, falling back to square for degenerate input.
fn source_aspect(src_width: u32, src_height: u32) -> f64 {
    if src_width == 0 || src_height == 0 {
        return 1.0;
    }
    src_width as f64 / src_height as f64
}

/// Resample an image to exactly `width` x `height` pixels.
///
/// One output pixel becomes one character cell. Lanczos3 keeps shrunk
/// posters free of the aliasing a nearest-neighbour pick produces.
pub fn resample(img: &DynamicImage, width: u32, height: u32) -> RgbImage {
    img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8()
}
