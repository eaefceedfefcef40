use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use tracing::{debug, info};

/// A named SQL script applied at most once
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: &'static str,
    pub sql: &'static str,
}

/// Scripts shipped with the binary. Applied in lexical order of `version`.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_init.sql",
        sql: include_str!("../migrations/0001_init.sql"),
    },
    Migration {
        version: "0002_answers_index.sql",
        sql: include_str!("../migrations/0002_answers_index.sql"),
    },
];

/// Apply the bundled migrations, then repair databases that predate the
/// category column. Returns how many scripts ran.
pub fn run_migrations(conn: &mut Connection) -> Result<usize> {
    let applied = apply_migrations(conn, MIGRATIONS)?;
    ensure_category_column(conn)?;
    Ok(applied)
}

/// Apply every script in `migrations` not yet recorded in `schema_migrations`.
///
/// Each script runs in its own transaction together with its bookkeeping row.
/// Blank scripts are skipped and left unrecorded.
pub fn apply_migrations(conn: &mut Connection, migrations: &[Migration]) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;

    let applied: HashSet<String> = {
        let mut stmt = conn.prepare("SELECT version FROM schema_migrations")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<std::result::Result<_, _>>()?
    };

    let mut pending: Vec<&Migration> = migrations
        .iter()
        .filter(|m| !applied.contains(m.version))
        .collect();
    pending.sort_by_key(|m| m.version);

    let mut count = 0;
    for migration in pending {
        if migration.sql.trim().is_empty() {
            debug!("Skipping empty migration {}", migration.version);
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            params![
                migration.version,
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
            ],
        )?;
        tx.commit()?;

        info!("Applied migration {}", migration.version);
        count += 1;
    }

    Ok(count)
}

/// Older databases were created before questions had a category.
/// Add the column if it is missing.
pub fn ensure_category_column(conn: &Connection) -> Result<()> {
    let has_column = {
        let mut stmt = conn.prepare("PRAGMA table_info(questions)")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
        let mut found = false;
        for name in names {
            if name? == "type" {
                found = true;
                break;
            }
        }
        found
    };

    if !has_column {
        info!("Adding missing category column to questions");
        conn.execute(
            "ALTER TABLE questions ADD COLUMN type TEXT NOT NULL DEFAULT ''",
            [],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied_versions(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_migrations_apply_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&mut conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_migrations(&mut conn).unwrap(), 0);
        assert_eq!(
            applied_versions(&conn),
            vec!["0001_init.sql", "0002_answers_index.sql"]
        );
    }

    #[test]
    fn test_scripts_run_in_lexical_order() {
        let mut conn = Connection::open_in_memory().unwrap();
        let scripts = [
            Migration {
                version: "0002_fill.sql",
                sql: "INSERT INTO t (v) VALUES ('second');",
            },
            Migration {
                version: "0001_create.sql",
                sql: "CREATE TABLE t (v TEXT);",
            },
        ];
        assert_eq!(apply_migrations(&mut conn, &scripts).unwrap(), 2);
        let v: String = conn.query_row("SELECT v FROM t", [], |r| r.get(0)).unwrap();
        assert_eq!(v, "second");
    }

    #[test]
    fn test_blank_script_is_not_recorded() {
        let mut conn = Connection::open_in_memory().unwrap();
        let scripts = [Migration {
            version: "0001_blank.sql",
            sql: "  \n ",
        }];
        assert_eq!(apply_migrations(&mut conn, &scripts).unwrap(), 0);
        assert!(applied_versions(&conn).is_empty());
    }

    #[test]
    fn test_failed_script_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        let scripts = [Migration {
            version: "0001_broken.sql",
            sql: "CREATE TABLE ok (v TEXT); NOT VALID SQL;",
        }];
        assert!(apply_migrations(&mut conn, &scripts).is_err());
        assert!(applied_versions(&conn).is_empty());
        let exists: i64 = conn
            .query_row(
                "SELECT COUNT(1) FROM sqlite_master WHERE name = 'ok'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(exists, 0);
    }

    #[test]
    fn test_legacy_table_gets_category_column() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE questions (id INTEGER PRIMARY KEY AUTOINCREMENT, text TEXT NOT NULL);
             INSERT INTO questions (text) VALUES ('old card');",
        )
        .unwrap();

        run_migrations(&mut conn).unwrap();

        let category: String = conn
            .query_row("SELECT type FROM questions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(category, "");
    }
}
