/// Label shown for questions stored without a category
pub const UNCATEGORIZED_LABEL: &str = "(none)";

/// A flashcard: one prompt plus its ordered answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub answers: Vec<String>,
    /// Category label, empty when the card was never categorized
    pub category: String,
}

impl Question {
    pub fn new(id: i64, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            answers: Vec::new(),
            category: category.into(),
        }
    }

    pub fn with_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers = answers.into_iter().map(Into::into).collect();
        self
    }
}

/// Category label with the number of questions filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: String,
    pub count: usize,
}

impl CategoryGroup {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }

    /// Label for display, with blank categories shown as `(none)`
    pub fn display_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            UNCATEGORIZED_LABEL
        } else {
            trimmed
        }
    }

    /// Case-insensitive substring match against an already lowercased needle
    pub fn matches(&self, needle: &str) -> bool {
        self.category.to_lowercase().contains(needle)
    }
}
