//! Reshaping a glyph stream into a fixed-size text block.

use super::mapping::Glyph;

/// ANSI "reset all attributes" sequence appended to colored rows.
pub const ANSI_RESET: &str = "\x1b[0m";

/// Format glyphs into at most `height` rows of `width` glyphs each.
///
/// Rows are joined by `\n`. If the stream runs out early the final row is
/// shorter and no further rows are emitted. Splitting counts glyphs, so an
/// escape sequence is never cut in half. Rows holding colored glyphs end
/// with [`ANSI_RESET`].
///
/// The dimensions are trusted as given: they must be the ones that drove
/// conversion.
pub fn format_grid(glyphs: &[Glyph], width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return String::new();
    }

    glyphs
        .chunks(width as usize)
        .take(height as usize)
        .map(|row| {
            let mut line: String = row.iter().map(Glyph::to_string).collect();
            if row.iter().any(Glyph::is_colored) {
                line.push_str(ANSI_RESET);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
