use crate::{CategoryGroup, Question, Result};

/// Where questions come from
///
/// The interaction engine only ever talks to storage through this trait,
/// so it can be driven in tests without a database.
pub trait QuestionSource {
    /// Questions ordered by id, answers in insertion order.
    /// `None` means every category; `Some("")` is the uncategorized group.
    fn load_questions(&self, category: Option<&str>) -> Result<Vec<Question>>;

    /// One entry per category, sorted by label
    fn load_category_groups(&self) -> Result<Vec<CategoryGroup>>;
}
