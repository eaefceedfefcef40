// Answer text -> bulleted display lines
use crate::highlight::Highlight;
use crate::wrap::wrap_lines;

const FIRST_PREFIX: &str = "- ";
const NEXT_PREFIX: &str = "  ";
const FENCE: &str = "```";
const TAB_WIDTH: usize = 4;

/// Tracks whether the bullet has been handed out yet.
/// Only the first emitted line of the whole answer gets `- `.
struct Bullet {
    used: bool,
}

impl Bullet {
    fn next(&mut self) -> &'static str {
        if self.used {
            NEXT_PREFIX
        } else {
            self.used = true;
            FIRST_PREFIX
        }
    }
}

/// Format one answer for a card `width` columns wide.
///
/// Plain lines are word-wrapped under a bullet; fenced code blocks are
/// highlighted and emitted verbatim. Leading blank lines are dropped and an
/// unterminated fence swallows the rest of the answer.
pub fn format_answer_lines(answer: &str, width: usize, highlighter: &dyn Highlight) -> Vec<String> {
    format_answers(&[answer], width, highlighter)
}

/// Format a card's answers as a single bulleted block: the bullet goes on
/// the first line emitted across all of them.
pub fn format_answers<S: AsRef<str>>(
    answers: &[S],
    width: usize,
    highlighter: &dyn Highlight,
) -> Vec<String> {
    let mut out = Vec::new();
    let mut bullet = Bullet { used: false };
    for answer in answers {
        format_into(answer.as_ref(), width, highlighter, &mut bullet, &mut out);
    }
    out
}

fn format_into(
    answer: &str,
    width: usize,
    highlighter: &dyn Highlight,
    bullet: &mut Bullet,
    out: &mut Vec<String>,
) {
    let mut code: Option<(String, Vec<&str>)> = None;

    for raw in answer.split('\n') {
        let line = raw.trim_end_matches('\r');
        let trimmed = line.trim();

        if let Some(tag) = trimmed.strip_prefix(FENCE) {
            match code.take() {
                None => code = Some((tag.trim().to_string(), Vec::new())),
                Some((lang, lines)) => {
                    let source = expand_tabs(&lines.join("\n"), TAB_WIDTH);
                    let highlighted = highlighter.highlight(&source, &lang);
                    let highlighted = highlighted.strip_suffix('\n').unwrap_or(&highlighted);
                    for code_line in highlighted.split('\n') {
                        out.push(format!("{}{}", bullet.next(), code_line));
                    }
                }
            }
            continue;
        }

        if let Some((_, lines)) = code.as_mut() {
            lines.push(line);
            continue;
        }

        if trimmed.is_empty() {
            if bullet.used {
                out.push(String::new());
            }
            continue;
        }

        let space = width.saturating_sub(FIRST_PREFIX.len()).max(1);
        for piece in wrap_lines(line, space) {
            out.push(format!("{}{}", bullet.next(), piece));
        }
    }
}

/// Replace tabs with spaces up to the next multiple of `tab_width`.
/// Columns restart on every line.
pub fn expand_tabs(text: &str, tab_width: usize) -> String {
    if tab_width == 0 || !text.contains('\t') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut col = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = tab_width - (col % tab_width);
                out.extend(std::iter::repeat(' ').take(spaces));
                col += spaces;
            }
            '\n' => {
                out.push(c);
                col = 0;
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;

    fn format(answer: &str, width: usize) -> Vec<String> {
        format_answer_lines(answer, width, &PlainHighlighter)
    }

    /// Highlighter that tags every line so we can see it ran
    struct Tagging;

    impl Highlight for Tagging {
        fn highlight(&self, code: &str, lang: &str) -> String {
            code.split('\n')
                .map(|l| format!("[{lang}]{l}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    #[test]
    fn test_single_line_gets_bullet() {
        assert_eq!(format("Goroutines", 60), vec!["- Goroutines"]);
    }

    #[test]
    fn test_wrapped_continuation_is_indented() {
        assert_eq!(
            format("alpha beta gamma delta", 12),
            vec!["- alpha beta", "  gamma", "  delta"]
        );
    }

    #[test]
    fn test_leading_blank_lines_do_not_use_bullet() {
        assert_eq!(format("\n\n  \nfirst\n\nsecond", 40), vec!["- first", "", "  second"]);
    }

    #[test]
    fn test_code_block_is_highlighted_not_wrapped() {
        let answer = "Use this:\n```go\nfor i := 0; i < 10; i++ { fmt.Println(i) }\n```";
        let lines = format_answer_lines(answer, 12, &Tagging);
        assert_eq!(
            lines,
            vec![
                "- Use this:",
                "  [go]for i := 0; i < 10; i++ { fmt.Println(i) }",
            ]
        );
    }

    #[test]
    fn test_code_block_first_takes_bullet() {
        let lines = format("```\nx = 1\ny = 2\n```", 40);
        assert_eq!(lines, vec!["- x = 1", "  y = 2"]);
    }

    #[test]
    fn test_tabs_expand_inside_code() {
        let lines = format("```\n\tindent\nab\tc\n```", 40);
        assert_eq!(lines, vec!["-     indent", "  ab  c"]);
    }

    #[test]
    fn test_blank_lines_inside_code_are_kept() {
        let lines = format("```\na\n\nb\n```", 40);
        assert_eq!(lines, vec!["- a", "  ", "  b"]);
    }

    #[test]
    fn test_unterminated_fence_drops_code() {
        assert_eq!(format("text\n```rust\nlet x = 1;", 40), vec!["- text"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        // The trailing newline leaves one blank line after content
        assert_eq!(format("one\r\ntwo\r\n", 40), vec!["- one", "  two", ""]);
    }

    #[test]
    fn test_tiny_width_still_makes_progress() {
        assert_eq!(format("a b", 1), vec!["- a", "  b"]);
    }

    #[test]
    fn test_only_first_line_has_bullet() {
        let answer = "first line is long enough to wrap around\n\n```sh\nls\n```\nlast";
        let lines = format(answer, 20);
        assert!(lines[0].starts_with("- "));
        for line in &lines[1..] {
            assert!(line.is_empty() || line.starts_with("  "), "{line:?}");
        }
    }

    #[test]
    fn test_answers_share_one_bullet() {
        let lines = format_answers(&["Goroutines", "Channels"], 60, &PlainHighlighter);
        assert_eq!(lines, vec!["- Goroutines", "  Channels"]);
    }

    #[test]
    fn test_expand_tabs_stops() {
        assert_eq!(expand_tabs("a\tb", 4), "a   b");
        assert_eq!(expand_tabs("abcd\te", 4), "abcd    e");
        assert_eq!(expand_tabs("x\n\ty", 4), "x\n    y");
        assert_eq!(expand_tabs("no tabs", 4), "no tabs");
    }
}
