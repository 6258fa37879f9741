//! Escape-sequence stripping helpers

use super::decoder::decode;

/// Remove all escape sequences from `text`.
///
/// Uses the same decoder as the screen, so anything the screen would
/// consume is removed. An unterminated sequence at the end is dropped.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('\x1b') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match decode(rest).consumed() {
            Some(n) => rest = &rest[n..],
            None => return out,
        }
    }

    out.push_str(rest);
    out
}

/// Number of characters in `text` once escape sequences are removed
pub fn visible_len(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ansi() {
        assert_eq!(strip_ansi("hello world"), "hello world");
    }

    #[test]
    fn test_basic_colors() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
    }

    #[test]
    fn test_multiple_codes() {
        assert_eq!(
            strip_ansi("\x1b[1;32mbold green\x1b[0m text"),
            "bold green text"
        );
    }

    #[test]
    fn test_256_color_and_osc() {
        assert_eq!(strip_ansi("\x1b[38;5;196mtext\x1b[0m"), "text");
        assert_eq!(strip_ansi("\x1b]0;title\x07prompt$ "), "prompt$ ");
        assert_eq!(strip_ansi("\x1b(Bplain"), "plain");
    }

    #[test]
    fn test_unterminated_tail_dropped() {
        assert_eq!(strip_ansi("abc\x1b[3"), "abc");
    }

    #[test]
    fn test_visible_len() {
        assert_eq!(visible_len("hello"), 5);
        assert_eq!(visible_len("\x1b[31mhello\x1b[0m"), 5);
        assert_eq!(visible_len("\x1b[1m⠋\x1b[0m ok"), 4);
        assert_eq!(visible_len(""), 0);
    }
}
