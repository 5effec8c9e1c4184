//! Greedy word wrap.

use super::face::{FontFace, text_width};

/// Break `text` into lines no wider than `max_width` pixels.
///
/// Words are separated by whitespace and rejoined with single spaces. A word
/// is appended to the current line while the line still fits; otherwise the
/// line is committed and the word starts the next one. A word wider than
/// `max_width` on its own is placed alone on its line, never split.
///
/// Always returns at least one line; it is empty only when `text` has no words.
pub fn wrap(text: &str, face: &dyn FontFace, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width(face, &candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::basic::BasicFace;

    // BasicFace at 8px: every character (space included) advances 6px.
    fn face() -> BasicFace {
        BasicFace::new(8.0)
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("SHORT", &face(), 10_000), vec!["SHORT"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap("", &face(), 100), vec![""]);
        assert_eq!(wrap("   ", &face(), 100), vec![""]);
    }

    #[test]
    fn breaks_when_next_word_does_not_fit() {
        // "CONQUER EVERY" is 13 chars = 78px; "CONQUER EVERY TRAIL" = 114px.
        let lines = wrap("CONQUER EVERY TRAIL", &face(), 80);
        assert_eq!(lines, vec!["CONQUER EVERY", "TRAIL"]);
    }

    #[test]
    fn width_exactly_at_limit_fits() {
        // "AB CD" = 30px.
        assert_eq!(wrap("AB CD", &face(), 30), vec!["AB CD"]);
        assert_eq!(wrap("AB CD", &face(), 29), vec!["AB", "CD"]);
    }

    #[test]
    fn overlong_word_stays_whole_on_its_own_line() {
        let lines = wrap("GO UNBELIEVABLY FAR", &face(), 40);
        assert_eq!(lines, vec!["GO", "UNBELIEVABLY", "FAR"]);
    }

    #[test]
    fn collapses_repeated_whitespace() {
        assert_eq!(wrap("  A \t B  ", &face(), 1000), vec!["A B"]);
    }

    #[test]
    fn rewrapping_joined_lines_is_stable() {
        let text = "EXPLORE THE WILD OUTDOORS WITH GEAR BUILT FOR EVERY SEASON AND SUMMIT";
        for max_width in [30, 60, 90, 150, 400] {
            let once = wrap(text, &face(), max_width);
            let twice = wrap(&once.join(" "), &face(), max_width);
            assert_eq!(once, twice, "max_width {max_width}");
        }
    }

    #[test]
    fn lines_never_exceed_width_unless_single_word() {
        let text = "ADVENTURE AWAITS BEYOND THE NEXT RIDGE";
        let f = face();
        for line in wrap(text, &f, 70) {
            assert!(text_width(&f, &line) <= 70 || !line.contains(' '), "{line}");
        }
    }
}
