//! ANSI color escape handling.

use std::sync::OnceLock;

use regex::Regex;

/// Matches SGR sequences of the form `ESC[<params>m`.
fn sgr_regex() -> &'static Regex {
    static SGR: OnceLock<Regex> = OnceLock::new();
    SGR.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("SGR pattern is valid"))
}

/// Remove every `ESC[<params>m` sequence from `s`.
pub fn strip_ansi(s: &str) -> String {
    sgr_regex().replace_all(s, "").into_owned()
}

/// Number of visible characters in `s`, escape sequences excluded.
pub fn visible_width(s: &str) -> usize {
    sgr_regex().replace_all(s, "").chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_truecolor() {
        assert_eq!(strip_ansi("\x1b[38;2;255;0;10m@\x1b[0m"), "@");
    }

    #[test]
    fn test_strip_256_color() {
        assert_eq!(strip_ansi("\x1b[38;5;16m#."), "#.");
    }

    #[test]
    fn test_strip_leaves_plain_text() {
        assert_eq!(strip_ansi("no escapes [here]"), "no escapes [here]");
    }

    #[test]
    fn test_visible_width_ignores_escapes() {
        assert_eq!(visible_width("\x1b[38;2;1;2;3m#\x1b[38;2;1;2;3m.\x1b[0m"), 2);
        assert_eq!(visible_width("┌─┐"), 3);
    }
}
