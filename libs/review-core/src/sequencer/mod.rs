//! The review sequencer contract.
//!
//! A sequencer owns the card queue and the scheduling algorithm. The review
//! session only reads the current card and deck back from it after every
//! action it forwards.

pub mod queue;

use crate::types::{Card, DeckPath, ReviewResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use queue::DeckQueue;

/// Queue statistics for one deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Cards left in the whole session queue.
    pub cards_in_queue_count: usize,
    /// Decks holding at least one queued card, across the whole queue.
    pub decks_in_queue_count: usize,
    /// Queued cards in this deck and its descendants.
    pub cards_in_queue_for_this_deck: usize,
    /// Strict descendants of this deck holding at least one queued card.
    pub decks_in_queue_for_this_deck: usize,
}

/// Predicted outcome of a response, for button labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulePreview {
    pub interval_days: f64,
}

impl SchedulePreview {
    /// Short interval label such as `3d`, `1.5m` or `2y`.
    pub fn label(&self) -> String {
        let days = self.interval_days;
        if days < 30.0 {
            format!("{}d", trim_decimal(days))
        } else if days < 365.0 {
            format!("{}m", trim_decimal(days / 30.0))
        } else {
            format!("{}y", trim_decimal(days / 365.0))
        }
    }
}

fn trim_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Owner of the review queue.
pub trait ReviewSequencer {
    /// Card at the head of the queue, if any.
    fn current_card(&self) -> Option<&Card>;

    /// Deck of the current card.
    fn current_deck(&self) -> Option<&DeckPath>;

    /// Source note of the current card.
    fn current_note(&self) -> Option<&str>;

    fn deck_stats(&self, deck: &DeckPath) -> DeckStats;

    /// Record a response for the current card and advance the queue.
    fn process_review(&mut self, response: ReviewResponse, now: DateTime<Utc>);

    /// Drop the current card from the queue without grading it.
    fn skip_current_card(&mut self);

    /// Predict the interval a response would give. Only used for labels.
    fn determine_schedule(&self, response: ReviewResponse, card: &Card) -> Option<SchedulePreview>;
}
