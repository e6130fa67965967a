//! Error types for review-core.
//!
//! Review actions never fail; these errors only come from the edges that
//! accept external data (settings, deck paths, in-memory queues).

use thiserror::Error;

/// Result type alias using ReviewError.
pub type Result<T> = std::result::Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    #[error("setting {name} out of range: {value}")]
    SettingOutOfRange { name: &'static str, value: u64 },

    #[error("empty label for {name}")]
    EmptyLabel { name: &'static str },

    #[error("empty deck path")]
    EmptyDeckPath,

    #[error("empty segment in deck path {path:?}")]
    EmptyPathSegment { path: String },

    #[error("duplicate card ID {id}")]
    DuplicateCard { id: i64 },

    #[error("deck {deck} is outside the session deck {root}")]
    DeckOutsideSession { deck: String, root: String },
}
