// The one accent colour and its reset, shared by every screen

/// 256-colour orange used for borders, titles and the selected row
pub const ACCENT: &str = "\x1b[38;5;208m";
pub const RESET: &str = "\x1b[0m";

/// Wrap `text` in the accent colour
pub fn accent(text: &str) -> String {
    format!("{ACCENT}{text}{RESET}")
}
