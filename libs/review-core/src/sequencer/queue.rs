//! In-memory review sequencer over a deck tree.
//!
//! `DeckQueue` is a reference `ReviewSequencer` for tests and simple
//! embedders. It is not part of the session contract: `ReviewSession` never
//! computes intervals or ease itself, it only asks its sequencer. Hosts with
//! their own storage and scheduler implement `ReviewSequencer` directly.

use super::{DeckStats, ReviewSequencer, SchedulePreview};
use crate::algorithm::{sm2::Sm2, SchedulingAlgorithm};
use crate::error::{Result, ReviewError};
use crate::types::{Card, DeckPath, ReviewResponse};
use chrono::{DateTime, Utc};
use std::collections::{HashSet, VecDeque};

/// Ordered queue of cards under one root deck.
///
/// Hard, Good and Easy take the card out of the queue with its new schedule.
/// Reset sends it back to new at the tail of the queue. Skipped cards leave
/// the queue ungraded.
pub struct DeckQueue {
    root: DeckPath,
    queue: VecDeque<Card>,
    reviewed: Vec<Card>,
    skipped: Vec<Card>,
    algorithm: Box<dyn SchedulingAlgorithm>,
}

impl DeckQueue {
    /// Build a queue, rejecting cards outside `root` and duplicate IDs.
    pub fn new(root: DeckPath, cards: Vec<Card>) -> Result<Self> {
        let mut seen = HashSet::new();
        for card in &cards {
            if !root.contains(&card.deck_path) {
                return Err(ReviewError::DeckOutsideSession {
                    deck: card.deck_path.to_string(),
                    root: root.to_string(),
                });
            }
            if !seen.insert(card.id) {
                return Err(ReviewError::DuplicateCard { id: card.id });
            }
        }

        Ok(Self {
            root,
            queue: cards.into(),
            reviewed: Vec::new(),
            skipped: Vec::new(),
            algorithm: Box::new(Sm2::default()),
        })
    }

    pub fn root(&self) -> &DeckPath {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cards graded out of the queue, in review order.
    pub fn reviewed(&self) -> &[Card] {
        &self.reviewed
    }

    pub fn skipped(&self) -> &[Card] {
        &self.skipped
    }

    fn queued_decks(&self) -> HashSet<&DeckPath> {
        self.queue.iter().map(|c| &c.deck_path).collect()
    }
}

impl ReviewSequencer for DeckQueue {
    fn current_card(&self) -> Option<&Card> {
        self.queue.front()
    }

    fn current_deck(&self) -> Option<&DeckPath> {
        self.queue.front().map(|c| &c.deck_path)
    }

    fn current_note(&self) -> Option<&str> {
        self.queue.front().map(|c| c.source_file.as_str())
    }

    fn deck_stats(&self, deck: &DeckPath) -> DeckStats {
        let decks = self.queued_decks();

        DeckStats {
            cards_in_queue_count: self.queue.len(),
            decks_in_queue_count: decks.len(),
            cards_in_queue_for_this_deck: self
                .queue
                .iter()
                .filter(|c| deck.contains(&c.deck_path))
                .count(),
            decks_in_queue_for_this_deck: decks.iter().filter(|d| deck.is_ancestor_of(d)).count(),
        }
    }

    fn process_review(&mut self, response: ReviewResponse, now: DateTime<Utc>) {
        let Some(mut card) = self.queue.pop_front() else {
            return;
        };

        card.schedule = self.algorithm.schedule(card.schedule.as_ref(), response, now);
        tracing::debug!(card_id = card.id, ?response, "processed review");

        if response == ReviewResponse::Reset {
            self.queue.push_back(card);
        } else {
            self.reviewed.push(card);
        }
    }

    fn skip_current_card(&mut self) {
        if let Some(card) = self.queue.pop_front() {
            tracing::debug!(card_id = card.id, "skipped card");
            self.skipped.push(card);
        }
    }

    fn determine_schedule(&self, response: ReviewResponse, card: &Card) -> Option<SchedulePreview> {
        self.algorithm
            .next_interval(card.schedule.as_ref(), response)
            .map(|interval_days| SchedulePreview { interval_days })
    }
}
