// Terminal flashcard engine: layout, state machine and the event loop
// Everything but the runner is plain string-in/string-out and testable
// without a terminal.

pub mod ansi;
pub mod answer;
pub mod app;
pub mod card;
pub mod groups;
pub mod highlight;
pub mod runner;
pub mod scroll;
pub mod style;
pub mod wrap;

pub use app::{App, AppEvent, BrowseSession, Key, Mode, ReviewSession, Services, Step, Viewport};
pub use highlight::{Highlight, PlainHighlighter, SyntectHighlighter};
pub use runner::run_tui;
