//! Per-deck progress counters.
//!
//! Remaining counts always come from fresh sequencer statistics. Totals are
//! taken the first time a deck is seen and only ever grow, so a sequencer
//! that re-queues cards never shows more remaining than total.

use crate::sequencer::ReviewSequencer;
use crate::types::DeckPath;
use serde::Serialize;
use std::collections::HashMap;

/// Counters for one deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeckProgress {
    pub total_cards_in_session: usize,
    pub cards_remaining: usize,
    pub total_subdecks_in_session: usize,
    pub subdecks_remaining: usize,
}

impl DeckProgress {
    pub fn cards_completed(&self) -> usize {
        self.total_cards_in_session.saturating_sub(self.cards_remaining)
    }

    pub fn subdecks_completed(&self) -> usize {
        self.total_subdecks_in_session
            .saturating_sub(self.subdecks_remaining)
    }

    /// Counter text, e.g. `2/5`.
    pub fn cards_label(&self) -> String {
        format!("{}/{}", self.cards_completed(), self.total_cards_in_session)
    }

    pub fn subdecks_label(&self) -> String {
        format!(
            "{}/{}",
            self.subdecks_completed(),
            self.total_subdecks_in_session
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckProgressSnapshot {
    /// The deck the session was started on.
    pub chosen: DeckProgress,
    /// The current card's deck, when the chosen deck has subdecks.
    pub current: Option<DeckProgress>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    cards: usize,
    subdecks: usize,
}

#[derive(Debug)]
pub(crate) struct ProgressTracker {
    chosen_deck: DeckPath,
    has_subdecks: bool,
    totals: HashMap<DeckPath, Totals>,
}

impl ProgressTracker {
    pub(crate) fn start<S: ReviewSequencer>(sequencer: &S, chosen_deck: DeckPath) -> Self {
        let stats = sequencer.deck_stats(&chosen_deck);
        Self {
            chosen_deck,
            has_subdecks: stats.decks_in_queue_for_this_deck > 0,
            totals: HashMap::new(),
        }
    }

    pub(crate) fn has_subdecks(&self) -> bool {
        self.has_subdecks
    }

    /// Rebuild the snapshot from the sequencer.
    pub(crate) fn snapshot<S: ReviewSequencer>(
        &mut self,
        sequencer: &S,
        current_deck: Option<&DeckPath>,
    ) -> DeckProgressSnapshot {
        let chosen_deck = self.chosen_deck.clone();
        let chosen = self.progress_for(sequencer, &chosen_deck);
        let current = match current_deck {
            Some(deck) if self.has_subdecks => Some(self.progress_for(sequencer, deck)),
            _ => None,
        };

        DeckProgressSnapshot { chosen, current }
    }

    fn progress_for<S: ReviewSequencer>(&mut self, sequencer: &S, deck: &DeckPath) -> DeckProgress {
        let stats = sequencer.deck_stats(deck);
        let totals = self.totals.entry(deck.clone()).or_default();
        totals.cards = totals.cards.max(stats.cards_in_queue_for_this_deck);
        totals.subdecks = totals.subdecks.max(stats.decks_in_queue_for_this_deck);

        DeckProgress {
            total_cards_in_session: totals.cards,
            cards_remaining: stats.cards_in_queue_for_this_deck,
            total_subdecks_in_session: totals.subdecks,
            subdecks_remaining: stats.decks_in_queue_for_this_deck,
        }
    }
}
