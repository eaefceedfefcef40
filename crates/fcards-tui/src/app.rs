// Application state and the transition function that drives it
use crate::ansi::fit_to_height;
use crate::card::{card_max_scroll, render_card, CardView};
use crate::groups::{filter_groups, render_group_list, GroupListView};
use crate::highlight::Highlight;
use crate::scroll::{clamp_index, clamp_scroll};
use crate::style::accent;
use fcards_core::{CategoryGroup, Question, QuestionSource};
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{info, warn};

/// Width assumed until the terminal reports its size
const DEFAULT_WIDTH: usize = 64;

/// Keys the engine cares about, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Enter,
    Esc,
    Backspace,
    /// Ctrl+C
    Interrupt,
    Other,
}

impl Key {
    /// `q` and Ctrl+C quit from anywhere, search box included
    pub fn is_quit(self) -> bool {
        matches!(self, Key::Char('q') | Key::Interrupt)
    }

    fn is_up(self) -> bool {
        matches!(self, Key::Up | Key::Char('k') | Key::Char('K'))
    }

    fn is_down(self) -> bool {
        matches!(self, Key::Down | Key::Char('j') | Key::Char('J'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Resize { width: usize, height: usize },
    Key(Key),
}

/// Outcome of feeding one event to the app
#[derive(Debug)]
pub enum Step {
    Continue(App),
    Quit,
}

/// Collaborators a transition may need
pub struct Services<'a> {
    pub source: &'a dyn QuestionSource,
    pub highlighter: &'a dyn Highlight,
    pub rng: &'a mut dyn RngCore,
}

/// Last known terminal size. A zero height means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: 0,
        }
    }
}

/// Reviewing a shuffled deck one card at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    pub questions: Vec<Question>,
    /// `index == questions.len()` means the session is exhausted
    pub index: usize,
    pub revealed: bool,
    pub scroll: usize,
}

impl ReviewSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            index: 0,
            revealed: false,
            scroll: 0,
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.questions.len()
    }

    fn max_scroll(&self, viewport: Viewport, highlighter: &dyn Highlight) -> usize {
        self.current().map_or(0, |q| {
            card_max_scroll(q, self.revealed, viewport.width, viewport.height, highlighter)
        })
    }

    fn handle_key(mut self, key: Key, viewport: Viewport, highlighter: &dyn Highlight) -> Self {
        if self.is_exhausted() && !matches!(key, Key::Char('h' | 'H')) {
            return self;
        }

        match key {
            k if k.is_up() => self.scroll = self.scroll.saturating_sub(1),
            k if k.is_down() => {
                if self.scroll < self.max_scroll(viewport, highlighter) {
                    self.scroll += 1;
                }
            }
            Key::Char('h' | 'H') => {
                if self.index > 0 {
                    self.index -= 1;
                    self.reset_card();
                }
            }
            Key::Char('l' | 'L') => {
                self.index += 1;
                self.reset_card();
            }
            Key::Enter => {
                self.revealed = !self.revealed;
                self.scroll = 0;
            }
            _ => {}
        }
        self
    }

    fn reset_card(&mut self) {
        self.revealed = false;
        self.scroll = 0;
    }
}

/// Browsing categories with an optional live search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSession {
    /// Sorted by label
    pub groups: Vec<CategoryGroup>,
    pub query: String,
    /// Index into the filtered view
    pub selected: usize,
    pub searching: bool,
    /// Set when opening a category failed; only quit works afterwards
    pub error: Option<String>,
}

impl BrowseSession {
    pub fn new(mut groups: Vec<CategoryGroup>) -> Self {
        groups.sort_by(|a, b| a.category.cmp(&b.category));
        Self {
            groups,
            query: String::new(),
            selected: 0,
            searching: false,
            error: None,
        }
    }

    pub fn filtered(&self) -> Vec<&CategoryGroup> {
        filter_groups(&self.groups, &self.query)
    }

    fn handle_key(mut self, key: Key, services: &mut Services<'_>) -> Mode {
        if self.error.is_some() {
            return Mode::Browse(self);
        }

        if self.searching {
            match key {
                Key::Enter | Key::Esc => self.searching = false,
                Key::Backspace => {
                    self.query.pop();
                }
                Key::Char(c) => self.query.push(c),
                _ => {}
            }
            return Mode::Browse(self);
        }

        match key {
            k if k.is_up() => self.selected = self.selected.saturating_sub(1),
            k if k.is_down() => {
                if self.selected + 1 < self.filtered().len() {
                    self.selected += 1;
                }
            }
            Key::Char('/') => {
                self.searching = true;
                self.query.clear();
            }
            Key::Enter => return self.open_selected(services),
            _ => {}
        }
        Mode::Browse(self)
    }

    /// Load the selected category and switch to reviewing it.
    /// On failure the browser stays put and shows the error.
    fn open_selected(mut self, services: &mut Services<'_>) -> Mode {
        let selected = self.filtered().get(self.selected).map(|g| g.category.clone());
        let Some(category) = selected else {
            return Mode::Browse(self);
        };

        match services.source.load_questions(Some(&category)) {
            Ok(mut questions) => {
                info!("Opening category {:?} with {} questions", category, questions.len());
                questions.shuffle(&mut *services.rng);
                Mode::Review(ReviewSession::new(questions))
            }
            Err(e) => {
                warn!("Failed to load category {:?}: {}", category, e);
                self.error = Some(e.to_string());
                Mode::Browse(self)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Review(ReviewSession),
    Browse(BrowseSession),
}

/// Whole UI state. Transitions consume it and hand back the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub mode: Mode,
    pub viewport: Viewport,
}

impl App {
    /// Start reviewing `questions` in a random order
    pub fn review(mut questions: Vec<Question>, rng: &mut dyn RngCore) -> Self {
        questions.shuffle(rng);
        Self {
            mode: Mode::Review(ReviewSession::new(questions)),
            viewport: Viewport::default(),
        }
    }

    /// Start in the category browser
    pub fn browse(groups: Vec<CategoryGroup>) -> Self {
        Self {
            mode: Mode::Browse(BrowseSession::new(groups)),
            viewport: Viewport::default(),
        }
    }

    /// Apply one event. Indices are re-clamped afterwards no matter which
    /// event fired.
    pub fn update(mut self, event: AppEvent, services: &mut Services<'_>) -> Step {
        match event {
            AppEvent::Resize { width, height } => {
                self.viewport = Viewport { width, height };
            }
            AppEvent::Key(key) => {
                if key.is_quit() {
                    return Step::Quit;
                }
                self.mode = match self.mode {
                    Mode::Review(session) => {
                        Mode::Review(session.handle_key(key, self.viewport, services.highlighter))
                    }
                    Mode::Browse(session) => session.handle_key(key, services),
                };
            }
        }

        self.clamp(services.highlighter);
        Step::Continue(self)
    }

    fn clamp(&mut self, highlighter: &dyn Highlight) {
        let viewport = self.viewport;
        match &mut self.mode {
            Mode::Review(session) => {
                session.index = session.index.min(session.questions.len());
                let max = session.max_scroll(viewport, highlighter);
                session.scroll = clamp_scroll(session.scroll, max);
            }
            Mode::Browse(session) => {
                let len = session.filtered().len();
                session.selected = clamp_index(session.selected, len);
            }
        }
    }

    /// Render the current screen, unpadded
    pub fn view(&self, highlighter: &dyn Highlight) -> String {
        let Viewport { width, height } = self.viewport;
        match &self.mode {
            Mode::Browse(session) => match &session.error {
                Some(error) => format!("Error: {error}\nq to quit"),
                None => render_group_list(
                    &GroupListView {
                        groups: &session.groups,
                        query: &session.query,
                        selected: session.selected,
                        searching: session.searching,
                    },
                    width,
                    height,
                ),
            },
            Mode::Review(session) => match session.current() {
                None => format!("{}\nq to quit", accent("No more questions in this session.")),
                Some(question) => render_card(
                    &CardView {
                        question,
                        revealed: session.revealed,
                        position: session.index + 1,
                        total: session.questions.len(),
                        scroll: session.scroll,
                    },
                    width,
                    height,
                    highlighter,
                ),
            },
        }
    }

    /// Render the current screen sized to exactly the terminal height
    pub fn frame(&self, highlighter: &dyn Highlight) -> String {
        fit_to_height(&self.view(highlighter), self.viewport.height)
    }
}
