//! Spaced repetition scheduling used by the in-memory sequencer.

pub mod sm2;

use crate::types::{CardSchedule, ReviewResponse};
use chrono::{DateTime, Utc};

/// Trait for spaced repetition algorithms.
pub trait SchedulingAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Interval in days a response would give, or `None` when the card
    /// goes back to new.
    fn next_interval(&self, schedule: Option<&CardSchedule>, response: ReviewResponse) -> Option<f64>;

    /// Schedule after a review, or `None` when the card goes back to new.
    fn schedule(
        &self,
        schedule: Option<&CardSchedule>,
        response: ReviewResponse,
        now: DateTime<Utc>,
    ) -> Option<CardSchedule>;
}
