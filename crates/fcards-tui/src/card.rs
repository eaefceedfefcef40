// Card layout: content lines, scroll window and the bordered frame
use crate::ansi::pad_right;
use crate::answer::format_answers;
use crate::highlight::Highlight;
use crate::scroll::clamp_scroll;
use crate::style::{accent, ACCENT, RESET};
use crate::wrap::wrap_lines;
use fcards_core::Question;

/// Rows taken by the frame: top border, title, separator, controls, bottom border
const FRAME_ROWS: usize = 5;
const MIN_CARD_WIDTH: usize = 34;
/// Card width when the terminal has not reported its size yet
const UNSIZED_CARD_WIDTH: usize = 64;
const TITLE: &str = "fcards";

/// Everything needed to draw one card
#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub question: &'a Question,
    pub revealed: bool,
    /// 1-based position in the session
    pub position: usize,
    pub total: usize,
    pub scroll: usize,
}

/// Question (and answers, once revealed) as a flat list of lines `width` wide
pub fn build_content_lines(
    question: &Question,
    revealed: bool,
    width: usize,
    highlighter: &dyn Highlight,
) -> Vec<String> {
    let mut lines = vec!["QUESTION".to_string()];
    lines.extend(wrap_lines(&question.text, width));
    lines.push(String::new());

    if revealed {
        lines.push("ANSWERS".to_string());
        if question.answers.is_empty() {
            lines.push("(no answers stored)".to_string());
        } else {
            lines.extend(format_answers(question.answers.as_slice(), width, highlighter));
        }
        lines.push(String::new());
    }

    lines
}

/// How many content lines fit on screen. A zero height (unknown terminal
/// size) shows everything.
pub fn visible_content_lines(total: usize, height: usize) -> usize {
    if total == 0 {
        return 0;
    }
    if height == 0 {
        return total;
    }
    height.saturating_sub(FRAME_ROWS).max(1).min(total)
}

pub fn max_scroll(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

/// Cards take half the terminal, but never get narrower than 34 columns
pub fn card_width(term_width: usize) -> usize {
    let width = if term_width > 0 {
        term_width / 2
    } else {
        UNSIZED_CARD_WIDTH
    };
    width.max(MIN_CARD_WIDTH)
}

/// Columns available for text between `| ` and ` |`
pub fn content_width(term_width: usize) -> usize {
    card_width(term_width) - 4
}

/// Furthest the card can scroll for the given terminal size
pub fn card_max_scroll(
    question: &Question,
    revealed: bool,
    term_width: usize,
    term_height: usize,
    highlighter: &dyn Highlight,
) -> usize {
    let lines = build_content_lines(question, revealed, content_width(term_width), highlighter);
    let visible = visible_content_lines(lines.len(), term_height);
    max_scroll(lines.len(), visible)
}

/// Controls hint; the scroll hint only appears when there is something to scroll
pub fn controls_hint(revealed: bool, scrollable: bool) -> String {
    let controls = if revealed {
        "H/L: next card  •  Enter: flip"
    } else {
        "Enter: flip  •  H/L: next card"
    };
    if scrollable {
        format!("Up/Down: scroll  •  {controls}")
    } else {
        controls.to_string()
    }
}

/// Draw the card as a bordered box. Lines are joined with `\n`, no trailing newline.
pub fn render_card(
    view: &CardView<'_>,
    term_width: usize,
    term_height: usize,
    highlighter: &dyn Highlight,
) -> String {
    let width = card_width(term_width);
    let inner = width - 2;
    let text_width = inner - 2;

    let row = |text: &str| -> String {
        format!(
            "{ACCENT}|{RESET} {} {ACCENT}|{RESET}",
            pad_right(text, text_width)
        )
    };
    let border = accent(&format!("+{}+", "-".repeat(inner)));

    let content = build_content_lines(view.question, view.revealed, text_width, highlighter);
    let visible = visible_content_lines(content.len(), term_height);
    let start = clamp_scroll(view.scroll, max_scroll(content.len(), visible));
    let end = (start + visible).min(content.len());

    let counter = format!("{}/{}", view.position, view.total);
    let header = format!(
        "{TITLE}{counter:>pad$}",
        pad = text_width.saturating_sub(TITLE.len())
    );

    let mut out = Vec::with_capacity(visible + 6);
    out.push(border.clone());
    out.push(row(&header));
    out.push(border.clone());
    for line in &content[start..end] {
        out.push(row(line));
    }
    out.push(row(&controls_hint(view.revealed, content.len() > visible)));
    out.push(border);

    out.join("\n")
}
