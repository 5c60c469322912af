//! Image to text conversion.
//!
//! This module provides the pure, I/O-free stages of turning a decoded
//! image into a block of terminal text:
//!
//! 1. **Dimensions** - derive the character grid size and resample
//! 2. **Mapping** - BT.601 luminance to a density-ramp glyph, optionally colored
//! 3. **Grid** - reshape the glyph stream into fixed-width rows
//! 4. **ANSI** - strip color escapes from monochrome output
//! 5. **Border** - frame a block under a title

mod ansi;
mod border;
mod charset;
mod dimensions;
mod grayscale;
mod grid;
mod mapping;

pub use ansi::{strip_ansi, visible_width};
pub use border::frame_with_title;
pub use charset::{glyph_for, DENSITY_RAMP};
pub use dimensions::{derive_dimensions, resample, CHAR_CELL_CORRECTION, MAX_GRID_SIDE};
pub use grayscale::luminance;
pub use grid::{format_grid, ANSI_RESET};
pub use mapping::{convert, glyphs_to_string, CellColor, Glyph};
