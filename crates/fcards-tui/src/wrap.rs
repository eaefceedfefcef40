// Greedy word wrap
use unicode_width::UnicodeWidthStr;

/// Wrap `text` into lines no wider than `width` columns.
///
/// Words are never split: a word wider than `width` sits alone on its own
/// line. Blank input yields a single empty line.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        if current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        current.push(' ');
        current.push_str(word);
        current_width += 1 + word_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_fits_on_one_line() {
        assert_eq!(
            wrap_lines("What is Go's concurrency model built on?", 60),
            vec!["What is Go's concurrency model built on?"]
        );
    }

    #[test]
    fn test_wraps_greedily() {
        assert_eq!(
            wrap_lines("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        // 3 + 1 + 5 == 9
        assert_eq!(wrap_lines("one three", 9), vec!["one three"]);
        assert_eq!(wrap_lines("one three", 8), vec!["one", "three"]);
    }

    #[test]
    fn test_long_word_is_not_split() {
        assert_eq!(
            wrap_lines("a supercalifragilistic b", 5),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(wrap_lines("  a \t b\n\nc  ", 80), vec!["a b c"]);
    }

    #[test]
    fn test_blank_input_yields_one_empty_line() {
        assert_eq!(wrap_lines("", 10), vec![String::new()]);
        assert_eq!(wrap_lines("   \t ", 10), vec![String::new()]);
    }

    #[test]
    fn test_lines_never_exceed_width_unless_single_word() {
        let text = "Lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua";
        for width in 1..40 {
            for line in wrap_lines(text, width) {
                assert!(
                    line.width() <= width || !line.contains(' '),
                    "width {width}: {line:?}"
                );
            }
        }
    }
}
