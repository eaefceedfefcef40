use crate::error::Result;
use crate::{migrate, seed};
use fcards_core::{CategoryGroup, Question, QuestionSource};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

/// Question store backed by a single SQLite file
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - The whole deck fits in one file under the data directory
/// - Doesn't require a separate process
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database and bring the schema up to date
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        debug!("Opened database at {}", path.as_ref().display());
        Self::from_connection(conn)
    }

    /// In-memory store, handy for tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrate::run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Insert the sample deck into an empty database
    pub fn seed_if_empty(&mut self) -> Result<bool> {
        seed::seed_if_empty(&mut self.conn)
    }

    /// Add a question with its answers, returning the new id
    pub fn insert_question(&mut self, text: &str, category: &str, answers: &[&str]) -> Result<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO questions (text, type) VALUES (?1, ?2)",
            params![text, category],
        )?;
        let id = tx.last_insert_rowid();
        for answer in answers {
            tx.execute(
                "INSERT INTO answers (question_id, text) VALUES (?1, ?2)",
                params![id, answer],
            )?;
        }
        tx.commit()?;
        Ok(id)
    }

    pub fn question_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(1) FROM questions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Questions ordered by id with answers in insertion order.
    /// `None` selects every category, `Some` matches the label exactly.
    pub fn questions(&self, filter: Option<&str>) -> Result<Vec<Question>> {
        let base = "SELECT q.id, q.text, q.type, a.text
                    FROM questions q
                    LEFT JOIN answers a ON q.id = a.question_id";
        let sql = match filter {
            Some(_) => format!("{base} WHERE q.type = ?1 ORDER BY q.id, a.id"),
            None => format!("{base} ORDER BY q.id, a.id"),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(i64, String, String, Option<String>)> {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        };
        let rows = match filter {
            Some(category) => stmt.query_map(params![category], map_row)?,
            None => stmt.query_map([], map_row)?,
        };

        // Rows for one question are adjacent thanks to ORDER BY q.id
        let mut questions: Vec<Question> = Vec::new();
        for row in rows {
            let (id, text, category, answer) = row?;
            let is_new = questions.last().map_or(true, |q| q.id != id);
            if is_new {
                questions.push(Question::new(id, text, category));
            }
            if let (Some(answer), Some(question)) = (answer, questions.last_mut()) {
                question.answers.push(answer);
            }
        }

        debug!("Loaded {} questions (filter: {:?})", questions.len(), filter);
        Ok(questions)
    }

    /// Question counts per category, sorted by label
    pub fn category_groups(&self) -> Result<Vec<CategoryGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT q.type, COUNT(1)
             FROM questions q
             GROUP BY q.type
             ORDER BY q.type",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryGroup::new(
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)? as usize,
            ))
        })?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }
}

impl QuestionSource for Store {
    fn load_questions(&self, category: Option<&str>) -> fcards_core::Result<Vec<Question>> {
        Ok(self.questions(category)?)
    }

    fn load_category_groups(&self) -> fcards_core::Result<Vec<CategoryGroup>> {
        Ok(self.category_groups()?)
    }
}
