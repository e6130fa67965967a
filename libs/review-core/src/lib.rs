//! Review-time decision core of a spaced-repetition flashcard tool.
//!
//! Provides:
//! - Character-level diff of a typed answer against the correct one (LCS)
//! - Answer correctness checks and edit distance
//! - Review session state machine with debounce, keyboard routing and
//!   per-deck progress counters
//! - The review sequencer contract plus an in-memory queue using SM-2

pub mod algorithm;
pub mod diff;
pub mod error;
pub mod host;
pub mod sequencer;
pub mod session;
pub mod types;

pub use algorithm::SchedulingAlgorithm;
pub use diff::{
    compute_diff, is_answer_correct, levenshtein_distance, render_diff_html, DiffKind, DiffSegment,
};
pub use error::{Result, ReviewError};
pub use host::{ContentRenderer, Notifier};
pub use sequencer::{DeckQueue, DeckStats, ReviewSequencer, SchedulePreview};
pub use session::{
    route_key, Action, CardMode, DeckProgress, DeckProgressSnapshot, IgnoreReason, Key, KeyEvent,
    Outcome, ResponseButton, ReviewPhase, ReviewSession, TypedAnswerCheck, ViewState,
};
pub use types::{
    AnswerMode, Card, CardSchedule, DeckOverrides, DeckPath, ReviewResponse, ReviewSettings,
    TextDirection,
};
