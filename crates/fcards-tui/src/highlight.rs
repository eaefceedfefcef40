// Syntax highlighting for fenced code in answers
use crate::style::RESET;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use tracing::warn;

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Turns a block of source code into terminal text.
///
/// Implementations must keep the line structure: one output line per
/// input line, joined with `\n`.
pub trait Highlight {
    fn highlight(&self, code: &str, lang: &str) -> String;
}

/// Leaves code untouched. Used when colour is unwanted and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlight for PlainHighlighter {
    fn highlight(&self, code: &str, _lang: &str) -> String {
        code.to_string()
    }
}

/// syntect-backed highlighter emitting 24-bit colour escapes
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Load the bundled syntaxes and the named theme.
    /// Unknown theme names fall back to the default theme.
    pub fn new(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                warn!("Unknown code theme {:?}, using {}", theme_name, DEFAULT_THEME);
                themes.remove(DEFAULT_THEME).unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    fn find_syntax(&self, code: &str, lang: &str) -> &SyntaxReference {
        let by_tag = Some(lang.trim())
            .filter(|l| !l.is_empty())
            .and_then(|l| self.syntax_set.find_syntax_by_token(l));

        // No usable tag: let the first line (shebang, <?php, ...) decide
        by_tag
            .or_else(|| {
                code.lines()
                    .next()
                    .and_then(|first| self.syntax_set.find_syntax_by_first_line(first))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl Highlight for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: &str) -> String {
        let syntax = self.find_syntax(code, lang);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut out = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ranges = match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => ranges,
                // Broken grammar state: show the code uncoloured
                Err(_) => return code.to_string(),
            };
            let escaped = as_24_bit_terminal_escaped(&ranges, false);
            let escaped = escaped.trim_end_matches(|c| c == '\n' || c == '\r');
            out.push(format!("{escaped}{RESET}"));
        }

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::visible_width;

    #[test]
    fn test_plain_highlighter_is_identity() {
        assert_eq!(PlainHighlighter.highlight("let x = 1;", "rust"), "let x = 1;");
    }

    #[test]
    fn test_syntect_keeps_lines_and_text() {
        let highlighter = SyntectHighlighter::default();
        let code = "fn main() {\n    println!(\"hi\");\n}";
        let out = highlighter.highlight(code, "rust");

        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(out.contains("\x1b[38;2;"));
        assert_eq!(visible_width(lines[1]), "    println!(\"hi\");".len());
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let highlighter = SyntectHighlighter::default();
        let out = highlighter.highlight("just words", "no-such-lang");
        assert_eq!(visible_width(&out), "just words".len());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = SyntectHighlighter::new("not-a-theme");
        assert_eq!(highlighter.highlight("", "rust"), "");
    }
}
