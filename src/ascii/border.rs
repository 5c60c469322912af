//! Titled box-drawing frame around a rendered block.

use super::ansi::{strip_ansi, visible_width};

/// Frame `block` in a box-drawing border with `title` in a header row.
///
/// Blank lines of the block are dropped. Every content row is padded to the
/// widest visible line (title included), and the frame is that width plus
/// four columns wide:
///
/// ```text
/// ┌──────────┐
/// │ Title    │
/// ├──────────┤
/// │ @@##..   │
/// └──────────┘
/// ```
pub fn frame_with_title(title: &str, block: &str) -> String {
    let lines: Vec<&str> = block
        .lines()
        .filter(|line| !strip_ansi(line).trim().is_empty())
        .collect();

    let max_width = lines
        .iter()
        .map(|line| visible_width(line))
        .chain(std::iter::once(visible_width(title)))
        .max()
        .unwrap_or(0);

    let rule = "─".repeat(max_width + 2);
    let mut out = Vec::with_capacity(lines.len() + 4);

    out.push(format!("┌{}┐", rule));
    out.push(padded_row(title, max_width));
    out.push(format!("├{}┤", rule));
    for line in &lines {
        out.push(padded_row(line, max_width));
    }
    out.push(format!("└{}┘", rule));

    out.join("\n")
}

/// `│ <content><padding> │`, padding computed on visible width.
fn padded_row(content: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(content));
    format!("│ {}{} │", content, " ".repeat(pad))
}
