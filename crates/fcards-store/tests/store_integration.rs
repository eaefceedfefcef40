use fcards_core::{CategoryGroup, QuestionSource};
use fcards_store::Store;
use tempfile::TempDir;

fn seeded_store(dir: &TempDir) -> Store {
    let mut store = Store::open(dir.path().join("flashcards.db")).unwrap();
    store.seed_if_empty().unwrap();
    store
}

#[test]
fn test_seed_populates_empty_database_once() {
    let dir = TempDir::new().unwrap();
    let mut store = seeded_store(&dir);
    assert_eq!(store.question_count().unwrap(), 3);

    // Second run must not duplicate the sample deck
    assert!(!store.seed_if_empty().unwrap());
    assert_eq!(store.question_count().unwrap(), 3);
}

#[test]
fn test_reopen_keeps_data_and_skips_applied_migrations() {
    let dir = TempDir::new().unwrap();
    {
        let _store = seeded_store(&dir);
    }
    let store = Store::open(dir.path().join("flashcards.db")).unwrap();
    assert_eq!(store.question_count().unwrap(), 3);
}

#[test]
fn test_load_questions_keeps_answer_order() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    let questions = store.load_questions(None).unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0].text, "What is Go's concurrency model built on?");
    assert_eq!(questions[0].answers, vec!["Goroutines", "Channels"]);
    assert!(questions.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_category_filter() {
    let dir = TempDir::new().unwrap();
    let mut store = seeded_store(&dir);
    store
        .insert_question("What does `cargo check` skip?", "rust", &["codegen"])
        .unwrap();

    let rust = store.load_questions(Some("rust")).unwrap();
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].category, "rust");

    assert_eq!(store.load_questions(None).unwrap().len(), 4);
    assert!(store.load_questions(Some("missing")).unwrap().is_empty());
}

#[test]
fn test_question_without_answers_has_empty_list() {
    let mut store = Store::open_in_memory().unwrap();
    store.insert_question("Lonely question?", "", &[]).unwrap();

    let questions = store.load_questions(None).unwrap();
    assert_eq!(questions.len(), 1);
    assert!(questions[0].answers.is_empty());
}

#[test]
fn test_empty_category_selects_uncategorized_only() {
    let mut store = Store::open_in_memory().unwrap();
    store.insert_question("filed", "general", &["a"]).unwrap();
    store.insert_question("loose", "", &["b"]).unwrap();

    let loose = store.load_questions(Some("")).unwrap();
    assert_eq!(loose.len(), 1);
    assert_eq!(loose[0].text, "loose");
}

#[test]
fn test_category_groups_sorted_by_label() {
    let mut store = Store::open_in_memory().unwrap();
    store.insert_question("a", "sql", &["x"]).unwrap();
    store.insert_question("b", "", &["y"]).unwrap();
    store.insert_question("c", "general", &["z"]).unwrap();
    store.insert_question("d", "general", &[]).unwrap();

    let groups = store.load_category_groups().unwrap();
    assert_eq!(
        groups,
        vec![
            CategoryGroup::new("", 1),
            CategoryGroup::new("general", 2),
            CategoryGroup::new("sql", 1),
        ]
    );
}
