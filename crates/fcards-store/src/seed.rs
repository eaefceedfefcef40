use crate::error::Result;
use rusqlite::{params, Connection};
use tracing::info;

/// Sample card inserted into an empty database
pub struct SeedCard {
    pub question: &'static str,
    pub answers: &'static [&'static str],
    pub category: &'static str,
}

pub const SAMPLE_DECK: &[SeedCard] = &[
    SeedCard {
        question: "What is Go's concurrency model built on?",
        answers: &["Goroutines", "Channels"],
        category: "general",
    },
    SeedCard {
        question: "Which SQL clause filters rows?",
        answers: &["WHERE"],
        category: "general",
    },
    SeedCard {
        question: "Name a Git command to list branches.",
        answers: &["git branch"],
        category: "general",
    },
];

/// Insert the sample deck when there are no questions yet.
/// Returns true if anything was written.
pub fn seed_if_empty(conn: &mut Connection) -> Result<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(1) FROM questions", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(false);
    }

    let tx = conn.transaction()?;
    for card in SAMPLE_DECK {
        tx.execute(
            "INSERT INTO questions (text, type) VALUES (?1, ?2)",
            params![card.question, card.category],
        )?;
        let question_id = tx.last_insert_rowid();
        for answer in card.answers {
            tx.execute(
                "INSERT INTO answers (question_id, text) VALUES (?1, ?2)",
                params![question_id, answer],
            )?;
        }
    }
    tx.commit()?;

    info!("Seeded {} sample questions", SAMPLE_DECK.len());
    Ok(true)
}
