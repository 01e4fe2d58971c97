//! Greedy text wrapping against measured glyph widths.
//!
//! Words are whitespace-delimited tokens and are never split. A single word
//! wider than the limit is kept whole on its own line.

use super::fonts::SizedFont;

pub const ELLIPSIS: &str = "...";

/// Anything that can report the rendered width of a string.
pub trait Measure {
    fn width(&self, text: &str) -> f32;
}

impl Measure for SizedFont {
    fn width(&self, text: &str) -> f32 {
        self.face.text_width(text, self.size)
    }
}

impl<F> Measure for F
where
    F: Fn(&str) -> f32,
{
    fn width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Fit `text` on one line, cutting at the first overflowing word and
/// appending `"..."`.
pub fn wrap_single_line<M: Measure + ?Sized>(text: &str, measure: &M, max_width: f32) -> String {
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = join_word(&line, word);
        if measure.width(&candidate) > max_width && !line.is_empty() {
            line.push_str(ELLIPSIS);
            return line;
        }
        line = candidate;
    }

    line
}

/// Break `text` into lines no wider than `max_width`. Empty input gives no lines.
pub fn wrap_multi_line<M: Measure + ?Sized>(
    text: &str,
    measure: &M,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = join_word(&current, word);
        if measure.width(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn join_word(line: &str, word: &str) -> String {
    if line.is_empty() {
        word.to_string()
    } else {
        format!("{line} {word}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::fonts::FontFace;

    // One unit per character keeps the arithmetic obvious.
    fn chars(text: &str) -> f32 {
        text.chars().count() as f32
    }

    #[test]
    fn test_single_line_fits() {
        assert_eq!(wrap_single_line("Lewis Hamilton", &chars, 20.0), "Lewis Hamilton");
    }

    #[test]
    fn test_single_line_truncates_with_ellipsis() {
        let line = wrap_single_line("alpha beta gamma delta", &chars, 12.0);
        assert_eq!(line, "alpha beta...");
    }

    #[test]
    fn test_single_line_keeps_overwide_first_word() {
        assert_eq!(
            wrap_single_line("Supercalifragilistic", &chars, 5.0),
            "Supercalifragilistic"
        );
        assert_eq!(
            wrap_single_line("Supercalifragilistic word", &chars, 5.0),
            "Supercalifragilistic..."
        );
    }

    #[test]
    fn test_single_line_empty() {
        assert_eq!(wrap_single_line("", &chars, 10.0), "");
        assert_eq!(wrap_single_line("   ", &chars, 10.0), "");
    }

    #[test]
    fn test_multi_line_breaks_between_words() {
        let lines = wrap_multi_line("the quick brown fox jumps over", &chars, 10.0);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over"]);
    }

    #[test]
    fn test_multi_line_overwide_word_gets_own_line() {
        let lines = wrap_multi_line("a extraordinarily b", &chars, 5.0);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_multi_line_empty_input() {
        assert!(wrap_multi_line("", &chars, 10.0).is_empty());
        assert!(wrap_multi_line(" \n\t ", &chars, 10.0).is_empty());
    }

    #[test]
    fn test_multi_line_reconstructs_tokens() {
        let text = "Causing  a collision\nat turn one   while gaining an advantage over car 16";
        let lines = wrap_multi_line(text, &chars, 14.0);
        let rebuilt = lines.join(" ");
        let expected: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rebuilt, expected.join(" "));
        for line in &lines {
            assert!(chars(line) <= 14.0 || !line.contains(' '));
        }
    }

    #[test]
    fn test_wrap_with_font_metrics() {
        let font = FontFace::Regular.at(11.0);
        let text = "Forcing another driver off track dangerously at the exit of turn four";
        let max = 120.0;
        let lines = wrap_multi_line(text, &font, max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(font.width(line) <= max);
        }

        let single = wrap_single_line(text, &font, max);
        assert!(single.ends_with(ELLIPSIS));
    }
}
