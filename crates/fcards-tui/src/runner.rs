// TUI event loop and terminal management
use crate::ansi::to_text;
use crate::app::{App, AppEvent, Key, Services, Step};
use crate::highlight::Highlight;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fcards_core::QuestionSource;
use ratatui::{backend::Backend, backend::CrosstermBackend, widgets::Paragraph, Terminal};
use std::io;
use tracing::{debug, info, warn};

/// Take over the terminal and run `app` until the user quits
pub fn run_tui(
    app: App,
    source: &dyn QuestionSource,
    highlighter: &dyn Highlight,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    info!("TUI started");

    let result = event_loop(&mut terminal, app, source, highlighter);

    restore_terminal(terminal.backend_mut());
    info!("TUI stopped");

    result
}

/// Undo the terminal setup. Every step runs even if an earlier one fails,
/// so a loop error is never masked by a restore error.
fn restore_terminal<W: io::Write>(out: &mut W) {
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen) {
        warn!("Failed to leave alternate screen: {}", e);
    }
    if let Err(e) = execute!(out, Show) {
        warn!("Failed to show cursor: {}", e);
    }
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    source: &dyn QuestionSource,
    highlighter: &dyn Highlight,
) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let mut services = Services {
        source,
        highlighter,
        rng: &mut rng,
    };

    // The first frame needs the real size, not the defaults
    let size = terminal.size()?;
    let mut pending = Some(AppEvent::Resize {
        width: size.width as usize,
        height: size.height as usize,
    });

    loop {
        if let Some(event) = pending.take() {
            app = match app.update(event, &mut services) {
                Step::Continue(next) => next,
                Step::Quit => return Ok(()),
            };
        }

        let text = to_text(&app.frame(highlighter));
        terminal.draw(|frame| frame.render_widget(Paragraph::new(text), frame.area()))?;

        pending = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(AppEvent::Key(translate_key(key)))
            }
            Event::Resize(width, height) => {
                debug!("Resized to {}x{}", width, height);
                Some(AppEvent::Resize {
                    width: width as usize,
                    height: height as usize,
                })
            }
            _ => None,
        };
    }
}

/// Map a crossterm key press onto the engine's key set
pub fn translate_key(key: KeyEvent) -> Key {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Key::Interrupt,
        KeyCode::Char('h') if ctrl => Key::Backspace,
        KeyCode::Char(_) if ctrl => Key::Other,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}
