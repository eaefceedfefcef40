// Column math and painting for strings carrying SGR colour codes
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};
use unicode_width::UnicodeWidthChar;

const ESC: char = '\x1b';

/// Terminal column width of `text`, with escape sequences counted as zero
pub fn visible_width(text: &str) -> usize {
    let mut in_escape = false;
    let mut width = 0;
    for c in text.chars() {
        if c == ESC {
            in_escape = true;
            continue;
        }
        if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
            continue;
        }
        width += c.width().unwrap_or(0);
    }
    width
}

/// Cut `text` down to `max_width` visible columns.
///
/// Escape sequences are always kept, even past the cut, so a trailing reset
/// still lands in the output.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut in_escape = false;
    let mut full = false;
    let mut width = 0;
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ESC {
            in_escape = true;
            result.push(c);
            continue;
        }
        if in_escape {
            result.push(c);
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
            continue;
        }
        if full {
            continue;
        }
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width {
            // Output must stay a prefix: nothing visible after the first miss
            full = true;
            continue;
        }
        result.push(c);
        width += char_width;
    }
    result
}

/// Pad with spaces (or truncate) so `text` occupies exactly `width` columns
pub fn pad_right(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    if visible > width {
        let truncated = truncate_to_width(text, width);
        let gap = width - visible_width(&truncated);
        return format!("{truncated}{}", " ".repeat(gap));
    }
    format!("{text}{}", " ".repeat(width - visible))
}

/// Make `frame` exactly `height` lines tall so nothing stale survives
/// below it. A zero height means the terminal size is unknown.
pub fn fit_to_height(frame: &str, height: usize) -> String {
    if height == 0 || frame.is_empty() {
        return frame.to_string();
    }
    let mut lines: Vec<&str> = frame.split('\n').collect();
    lines.resize(height, "");
    lines.join("\n")
}

/// Convert a frame with embedded SGR codes into styled ratatui text.
///
/// Colour state carries across line breaks the way it would on a raw
/// terminal. Non-SGR sequences are dropped.
pub fn to_text(frame: &str) -> Text<'static> {
    let mut style = Style::default();
    let mut lines = Vec::new();

    for raw in frame.split('\n') {
        let mut spans = Vec::new();
        let mut buf = String::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            if c != ESC {
                buf.push(c);
                continue;
            }

            let mut params = String::new();
            let mut terminator = None;
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    terminator = Some(n);
                    break;
                }
                params.push(n);
            }

            if terminator == Some('m') {
                if !buf.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut buf), style));
                }
                style = apply_sgr(style, params.trim_start_matches('['));
            }
        }

        if !buf.is_empty() {
            spans.push(Span::styled(buf, style));
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

fn apply_sgr(mut style: Style, params: &str) -> Style {
    let codes: Vec<u16> = params
        .split(';')
        .map(|p| p.parse().unwrap_or(0))
        .collect();

    let mut i = 0;
    while i < codes.len() {
        match codes[i] {
            0 => style = Style::default(),
            1 => style = style.add_modifier(Modifier::BOLD),
            3 => style = style.add_modifier(Modifier::ITALIC),
            4 => style = style.add_modifier(Modifier::UNDERLINED),
            22 => style = style.remove_modifier(Modifier::BOLD),
            23 => style = style.remove_modifier(Modifier::ITALIC),
            24 => style = style.remove_modifier(Modifier::UNDERLINED),
            39 => style = style.fg(Color::Reset),
            49 => style = style.bg(Color::Reset),
            code @ (38 | 48) => {
                let color = match codes.get(i + 1) {
                    Some(5) => {
                        let c = codes.get(i + 2).map(|&n| Color::Indexed(n as u8));
                        i += 2;
                        c
                    }
                    Some(2) => {
                        let rgb = (codes.get(i + 2), codes.get(i + 3), codes.get(i + 4));
                        i += 4;
                        match rgb {
                            (Some(&r), Some(&g), Some(&b)) => Some(Color::Rgb(r as u8, g as u8, b as u8)),
                            _ => None,
                        }
                    }
                    _ => None,
                };
                if let Some(color) = color {
                    style = if code == 38 { style.fg(color) } else { style.bg(color) };
                }
            }
            code @ 30..=37 => style = style.fg(Color::Indexed((code - 30) as u8)),
            code @ 90..=97 => style = style.fg(Color::Indexed((code - 90 + 8) as u8)),
            _ => {}
        }
        i += 1;
    }
    style
}
