//! Shared fixtures for review session integration tests.

use chrono::{DateTime, Utc};
use review_core::{AnswerMode, Card, DeckPath};

/// Install a test-writer subscriber once so `RUST_LOG=review_core=debug`
/// shows session tracing.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn path(s: &str) -> DeckPath {
    DeckPath::parse(s).expect("valid deck path")
}

/// Fixed clock offset in milliseconds.
pub fn at(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000 + ms).expect("valid timestamp")
}

pub fn flip_card(id: i64, deck: &str) -> Card {
    Card {
        id,
        deck_path: path(deck),
        front: format!("Question {id}"),
        back: format!("Answer {id}"),
        source_file: format!("{}.md", path(deck).name()),
        answer_mode: AnswerMode::Flip,
        schedule: None,
    }
}

pub fn typed_card(id: i64, deck: &str, back: &str) -> Card {
    Card {
        back: back.to_string(),
        answer_mode: AnswerMode::Typed,
        ..flip_card(id, deck)
    }
}

/// Three French cards then two Spanish cards under `lang`.
pub fn language_cards() -> Vec<Card> {
    vec![
        flip_card(1, "lang/french"),
        flip_card(2, "lang/french"),
        typed_card(3, "lang/french", "le chat"),
        flip_card(4, "lang/spanish"),
        flip_card(5, "lang/spanish"),
    ]
}
