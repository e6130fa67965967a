//! Review session controller.
//!
//! Drives one card at a time through front, typed-answer check and back,
//! forwarding responses and skips to a [`ReviewSequencer`]. After every
//! forwarded action the current card, deck and progress counters are read
//! back from the sequencer rather than tracked locally.
//!
//! Actions never fail. They either apply, are ignored (wrong phase, inside
//! the debounce window, session closed) or end the session when the
//! sequencer runs out of cards.

pub mod keys;
pub mod progress;
pub mod view;

pub use keys::{route_key, Action, Key, KeyEvent};
pub use progress::{DeckProgress, DeckProgressSnapshot};
pub use view::{project_view, ViewState};

use crate::diff::{compute_diff, is_answer_correct, levenshtein_distance, DiffSegment};
use crate::host::{ContentRenderer, Notifier};
use crate::sequencer::{ReviewSequencer, SchedulePreview};
use crate::types::{Card, DeckOverrides, DeckPath, ReviewResponse, ReviewSettings};
use chrono::{DateTime, Duration, Utc};
use progress::ProgressTracker;
use serde::Serialize;

/// Visible face of the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardMode {
    Front,
    Back,
    Closed,
}

/// State-machine phase, splitting Front by answer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPhase {
    Front,
    TypedAnswerPendingCheck,
    Back,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Closed,
    WrongPhase,
    Debounced,
    InputFrozen,
}

/// Result of a session action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
    /// The sequencer had no card left; the session is now closed.
    SessionEnded,
}

/// Result of checking a typed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedAnswerCheck {
    pub user_answer: String,
    pub is_correct: bool,
    pub diff: Vec<DiffSegment>,
    /// Levenshtein distance between the trimmed answers.
    pub edit_distance: usize,
}

/// Label and interval preview of a response button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseButton {
    pub response: ReviewResponse,
    pub label: String,
    pub interval: Option<String>,
}

impl ResponseButton {
    pub fn text(&self) -> String {
        match &self.interval {
            Some(interval) => format!("{} - {}", self.label, interval),
            None => self.label.clone(),
        }
    }
}

pub struct ReviewSession<S> {
    sequencer: S,
    settings: ReviewSettings,
    overrides: Vec<DeckOverrides>,
    chosen_deck: DeckPath,
    mode: CardMode,
    card: Option<Card>,
    deck: Option<DeckPath>,
    last_action_at: Option<DateTime<Utc>>,
    typed_answer: String,
    input_frozen: bool,
    last_check: Option<TypedAnswerCheck>,
    tracker: ProgressTracker,
    progress: DeckProgressSnapshot,
    finished: bool,
}

impl<S: ReviewSequencer> ReviewSession<S> {
    /// Start reviewing `chosen_deck`. Ends immediately if the sequencer has
    /// no card.
    pub fn start(sequencer: S, chosen_deck: DeckPath, settings: ReviewSettings) -> Self {
        let tracker = ProgressTracker::start(&sequencer, chosen_deck.clone());
        tracing::info!(
            deck = %chosen_deck,
            subdecks = tracker.has_subdecks(),
            "review session started"
        );

        let mut session = Self {
            sequencer,
            settings,
            overrides: Vec::new(),
            chosen_deck,
            mode: CardMode::Front,
            card: None,
            deck: None,
            last_action_at: None,
            typed_answer: String::new(),
            input_frozen: false,
            last_check: None,
            tracker,
            progress: DeckProgressSnapshot::default(),
            finished: false,
        };
        session.load_current();
        session
    }

    pub fn with_deck_overrides(mut self, overrides: Vec<DeckOverrides>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn mode(&self) -> CardMode {
        self.mode
    }

    pub fn phase(&self) -> ReviewPhase {
        match self.mode {
            CardMode::Front => match &self.card {
                Some(card) if card.requires_typed_answer() => ReviewPhase::TypedAnswerPendingCheck,
                _ => ReviewPhase::Front,
            },
            CardMode::Back => ReviewPhase::Back,
            CardMode::Closed => ReviewPhase::Closed,
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn current_deck(&self) -> Option<&DeckPath> {
        self.deck.as_ref()
    }

    pub fn chosen_deck(&self) -> &DeckPath {
        &self.chosen_deck
    }

    pub fn typed_answer(&self) -> &str {
        &self.typed_answer
    }

    pub fn last_check(&self) -> Option<&TypedAnswerCheck> {
        self.last_check.as_ref()
    }

    pub fn progress(&self) -> &DeckProgressSnapshot {
        &self.progress
    }

    /// True once the sequencer ran out of cards.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn sequencer(&self) -> &S {
        &self.sequencer
    }

    pub fn into_sequencer(self) -> S {
        self.sequencer
    }

    /// Global settings merged with the overrides covering the current deck.
    pub fn effective_settings(&self) -> ReviewSettings {
        let overrides = self
            .deck
            .as_ref()
            .and_then(|deck| DeckOverrides::most_specific(&self.overrides, deck));
        self.settings.merge(overrides)
    }

    pub fn view(&self) -> ViewState {
        let answer_mode = self
            .card
            .as_ref()
            .map(|c| c.answer_mode)
            .unwrap_or_default();
        project_view(self.phase(), answer_mode, &self.progress)
    }

    /// Replace the typed answer while the card still waits for its check.
    pub fn set_typed_answer(&mut self, text: impl Into<String>) -> Outcome {
        if self.mode == CardMode::Closed {
            return self.ignore("set_typed_answer", IgnoreReason::Closed);
        }
        if self.input_frozen {
            return self.ignore("set_typed_answer", IgnoreReason::InputFrozen);
        }
        if self.phase() != ReviewPhase::TypedAnswerPendingCheck {
            return self.ignore("set_typed_answer", IgnoreReason::WrongPhase);
        }

        self.typed_answer = text.into();
        Outcome::Applied
    }

    pub fn reveal_answer(&mut self, now: DateTime<Utc>) -> Outcome {
        match self.phase() {
            ReviewPhase::Front => {}
            ReviewPhase::Closed => return self.ignore("reveal_answer", IgnoreReason::Closed),
            _ => return self.ignore("reveal_answer", IgnoreReason::WrongPhase),
        }
        if !self.accept(now) {
            return self.ignore("reveal_answer", IgnoreReason::Debounced);
        }

        self.mode = CardMode::Back;
        tracing::debug!(card_id = ?self.card.as_ref().map(|c| c.id), "answer revealed");
        Outcome::Applied
    }

    /// Compare the typed answer with the card's back and flip the card.
    ///
    /// The card goes to Back whether or not the answer was right; grading
    /// stays a separate user action.
    pub fn check_typed_answer(&mut self, now: DateTime<Utc>) -> Outcome {
        match self.phase() {
            ReviewPhase::TypedAnswerPendingCheck => {}
            ReviewPhase::Closed => return self.ignore("check_typed_answer", IgnoreReason::Closed),
            _ => return self.ignore("check_typed_answer", IgnoreReason::WrongPhase),
        }
        if !self.accept(now) {
            return self.ignore("check_typed_answer", IgnoreReason::Debounced);
        }
        let Some(card) = &self.card else {
            return self.ignore("check_typed_answer", IgnoreReason::WrongPhase);
        };

        let case_sensitive = self.effective_settings().case_sensitive_answers;
        let check = TypedAnswerCheck {
            user_answer: self.typed_answer.clone(),
            is_correct: is_answer_correct(&self.typed_answer, &card.back, case_sensitive),
            diff: compute_diff(&self.typed_answer, &card.back, case_sensitive),
            edit_distance: edit_distance(&self.typed_answer, &card.back, case_sensitive),
        };
        tracing::debug!(
            card_id = card.id,
            correct = check.is_correct,
            edit_distance = check.edit_distance,
            "typed answer checked"
        );

        self.last_check = Some(check);
        self.input_frozen = true;
        self.mode = CardMode::Back;
        Outcome::Applied
    }

    /// Grade the current card. Reset is also accepted on the front.
    pub fn respond(&mut self, response: ReviewResponse, now: DateTime<Utc>) -> Outcome {
        match (self.phase(), response) {
            (ReviewPhase::Closed, _) => return self.ignore("respond", IgnoreReason::Closed),
            (ReviewPhase::Back, _) | (_, ReviewResponse::Reset) => {}
            _ => return self.ignore("respond", IgnoreReason::WrongPhase),
        }
        if !self.accept(now) {
            return self.ignore("respond", IgnoreReason::Debounced);
        }

        tracing::debug!(
            card_id = ?self.card.as_ref().map(|c| c.id),
            ?response,
            "response submitted"
        );
        self.sequencer.process_review(response, now);
        self.load_current()
    }

    /// Move past the current card without grading it. Front only, typed
    /// cards included.
    pub fn skip(&mut self) -> Outcome {
        match self.phase() {
            ReviewPhase::Front | ReviewPhase::TypedAnswerPendingCheck => {}
            ReviewPhase::Closed => return self.ignore("skip", IgnoreReason::Closed),
            ReviewPhase::Back => return self.ignore("skip", IgnoreReason::WrongPhase),
        }

        tracing::debug!(card_id = ?self.card.as_ref().map(|c| c.id), "card skipped");
        self.sequencer.skip_current_card();
        self.load_current()
    }

    pub fn dispatch(&mut self, action: Action, now: DateTime<Utc>) -> Outcome {
        match action {
            Action::RevealAnswer => self.reveal_answer(now),
            Action::CheckTypedAnswer => self.check_typed_answer(now),
            Action::Respond(response) => self.respond(response, now),
            Action::Skip => self.skip(),
        }
    }

    /// Route a key press. `None` means the key is not ours and should
    /// propagate; `Some` means it was consumed, whatever the outcome.
    pub fn handle_key(&mut self, event: &KeyEvent, now: DateTime<Utc>) -> Option<Outcome> {
        let action = route_key(event, self.phase())?;
        Some(self.dispatch(action, now))
    }

    /// Tear the session down. Every later action is ignored.
    pub fn close(&mut self) {
        if self.mode != CardMode::Closed {
            self.mode = CardMode::Closed;
            tracing::info!(deck = %self.chosen_deck, "review session closed");
        }
    }

    /// Response buttons with interval previews for the current card.
    pub fn response_previews(&self) -> Vec<ResponseButton> {
        let Some(card) = &self.card else {
            return Vec::new();
        };
        let settings = self.effective_settings();

        ReviewResponse::ALL
            .iter()
            .map(|&response| ResponseButton {
                response,
                label: settings.label(response).to_string(),
                interval: settings
                    .show_interval_previews
                    .then(|| self.sequencer.determine_schedule(response, card))
                    .flatten()
                    .map(|preview| preview.label()),
            })
            .collect()
    }

    /// Send the current card's scheduling info to the notifier.
    pub fn show_card_info<N: Notifier>(&self, notifier: &mut N) {
        let Some(card) = &self.card else {
            return;
        };

        let message = match &card.schedule {
            None => format!("Card {}: new card", card.id),
            Some(schedule) => format!(
                "Card {}: ease {:.2}, interval {}, reviews {}, due {}",
                card.id,
                schedule.ease_factor,
                SchedulePreview {
                    interval_days: schedule.interval_days
                }
                .label(),
                schedule.reviews_count,
                schedule.due.format("%Y-%m-%d"),
            ),
        };
        notifier.notify(&message);
    }

    /// Render the visible faces of the current card.
    pub fn render_current<R: ContentRenderer>(&self, renderer: &mut R) {
        let Some(card) = &self.card else {
            return;
        };
        if self.mode == CardMode::Closed {
            return;
        }

        let direction = self.effective_settings().text_direction;
        renderer.render(&card.front, direction);
        if self.mode == CardMode::Back {
            renderer.render(&card.back, direction);
        }
    }

    /// Breadcrumb of the current card: deck segments then source note.
    pub fn card_context(&self) -> Option<String> {
        let deck = self.deck.as_ref()?;
        let mut parts: Vec<&str> = deck.segments().iter().map(String::as_str).collect();
        if let Some(note) = self.sequencer.current_note() {
            parts.push(note);
        }
        Some(parts.join(" > "))
    }

    /// Re-read the current card and deck after the sequencer moved.
    fn load_current(&mut self) -> Outcome {
        self.card = self.sequencer.current_card().cloned();
        self.deck = self.sequencer.current_deck().cloned();
        self.typed_answer.clear();
        self.input_frozen = false;
        self.last_check = None;
        self.progress = self.tracker.snapshot(&self.sequencer, self.deck.as_ref());

        match &self.card {
            Some(card) => {
                self.mode = CardMode::Front;
                tracing::debug!(card_id = card.id, deck = ?self.deck, "card loaded");
                Outcome::Applied
            }
            None => {
                self.mode = CardMode::Closed;
                self.finished = true;
                tracing::info!(deck = %self.chosen_deck, "review session ended, no cards left");
                Outcome::SessionEnded
            }
        }
    }

    /// Debounce gate. Only accepted actions move the timestamp.
    fn accept(&mut self, now: DateTime<Utc>) -> bool {
        let delay_ms = self.effective_settings().review_button_delay_ms;
        if let Some(last) = self.last_action_at {
            // Delays past the representable range saturate.
            let delay = i64::try_from(delay_ms)
                .ok()
                .and_then(Duration::try_milliseconds)
                .unwrap_or(Duration::MAX);
            if delay_ms > 0 && now.signed_duration_since(last) < delay {
                return false;
            }
        }
        self.last_action_at = Some(now);
        true
    }

    fn ignore(&self, action: &'static str, reason: IgnoreReason) -> Outcome {
        tracing::debug!(action, ?reason, mode = ?self.mode, "ignored review action");
        Outcome::Ignored(reason)
    }
}

fn edit_distance(user_answer: &str, correct_answer: &str, case_sensitive: bool) -> usize {
    if case_sensitive {
        levenshtein_distance(user_answer.trim(), correct_answer.trim())
    } else {
        levenshtein_distance(
            &user_answer.trim().to_lowercase(),
            &correct_answer.trim().to_lowercase(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffKind;
    use crate::sequencer::DeckQueue;
    use crate::types::{AnswerMode, TextDirection};
    use pretty_assertions::assert_eq;

    fn path(s: &str) -> DeckPath {
        DeckPath::parse(s).unwrap()
    }

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
    }

    fn card(id: i64, deck: &str, mode: AnswerMode) -> Card {
        Card {
            id,
            deck_path: path(deck),
            front: format!("front {id}"),
            back: format!("back {id}"),
            source_file: "notes.md".to_string(),
            answer_mode: mode,
            schedule: None,
        }
    }

    fn session_with(cards: Vec<Card>, settings: ReviewSettings) -> ReviewSession<DeckQueue> {
        let queue = DeckQueue::new(path("lang"), cards).unwrap();
        ReviewSession::start(queue, path("lang"), settings)
    }

    fn flip_session(count: i64) -> ReviewSession<DeckQueue> {
        let cards = (1..=count).map(|id| card(id, "lang", AnswerMode::Flip)).collect();
        session_with(cards, ReviewSettings::default())
    }

    fn delayed(ms: u64) -> ReviewSettings {
        ReviewSettings {
            review_button_delay_ms: ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_on_front() {
        let session = flip_session(2);
        assert_eq!(session.mode(), CardMode::Front);
        assert_eq!(session.phase(), ReviewPhase::Front);
        assert_eq!(session.current_card().map(|c| c.id), Some(1));
        assert_eq!(session.progress().chosen.total_cards_in_session, 2);
        assert_eq!(session.progress().chosen.cards_remaining, 2);
        assert!(session.progress().current.is_none());
    }

    #[test]
    fn test_empty_queue_ends_immediately() {
        let session = session_with(Vec::new(), ReviewSettings::default());
        assert!(session.is_finished());
        assert_eq!(session.mode(), CardMode::Closed);
        assert!(session.current_card().is_none());
    }

    #[test]
    fn test_grade_in_front_is_ignored() {
        let mut session = flip_session(2);
        let before = session.progress().clone();

        let outcome = session.respond(ReviewResponse::Good, at(0));

        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::WrongPhase));
        assert_eq!(session.mode(), CardMode::Front);
        assert_eq!(session.progress(), &before);
        assert_eq!(session.current_card().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_reveal_then_grade_advances() {
        let mut session = flip_session(2);

        assert_eq!(session.reveal_answer(at(0)), Outcome::Applied);
        assert_eq!(session.mode(), CardMode::Back);
        assert_eq!(session.respond(ReviewResponse::Good, at(10)), Outcome::Applied);

        assert_eq!(session.mode(), CardMode::Front);
        assert_eq!(session.current_card().map(|c| c.id), Some(2));
        assert_eq!(session.progress().chosen.cards_remaining, 1);
    }

    #[test]
    fn test_last_grade_ends_session() {
        let mut session = flip_session(1);
        session.reveal_answer(at(0));

        assert_eq!(session.respond(ReviewResponse::Easy, at(10)), Outcome::SessionEnded);
        assert!(session.is_finished());
        assert_eq!(session.mode(), CardMode::Closed);
        assert_eq!(session.reveal_answer(at(20)), Outcome::Ignored(IgnoreReason::Closed));
        assert_eq!(session.sequencer().reviewed().len(), 1);
    }

    #[test]
    fn test_reveal_only_in_front() {
        let mut session = flip_session(1);
        session.reveal_answer(at(0));
        assert_eq!(
            session.reveal_answer(at(10)),
            Outcome::Ignored(IgnoreReason::WrongPhase)
        );
    }

    #[test]
    fn test_debounce_drops_close_actions() {
        let mut session = session_with(
            vec![card(1, "lang", AnswerMode::Flip), card(2, "lang", AnswerMode::Flip)],
            delayed(500),
        );

        assert_eq!(session.reveal_answer(at(0)), Outcome::Applied);
        assert_eq!(
            session.respond(ReviewResponse::Good, at(200)),
            Outcome::Ignored(IgnoreReason::Debounced)
        );
        assert_eq!(session.mode(), CardMode::Back);
        // The rejected press did not move the window.
        assert_eq!(session.respond(ReviewResponse::Good, at(500)), Outcome::Applied);
        assert_eq!(session.current_card().map(|c| c.id), Some(2));
    }

    #[test]
    fn test_debounce_blocks_double_grade() {
        let mut session = session_with(
            (1..=3).map(|id| card(id, "lang", AnswerMode::Flip)).collect(),
            delayed(300),
        );

        session.reveal_answer(at(0));
        assert_eq!(session.respond(ReviewResponse::Good, at(400)), Outcome::Applied);
        // Second press lands on the fresh card's front and is debounced anyway.
        assert_eq!(
            session.reveal_answer(at(450)),
            Outcome::Ignored(IgnoreReason::Debounced)
        );
        assert_eq!(session.sequencer().reviewed().len(), 1);
        assert_eq!(session.reveal_answer(at(800)), Outcome::Applied);
    }

    #[test]
    fn test_skip_only_in_front_and_not_debounced() {
        let mut session = session_with(
            (1..=3).map(|id| card(id, "lang", AnswerMode::Flip)).collect(),
            delayed(1000),
        );

        assert_eq!(session.skip(), Outcome::Applied);
        assert_eq!(session.skip(), Outcome::Applied);
        assert_eq!(session.current_card().map(|c| c.id), Some(3));

        session.reveal_answer(at(0));
        assert_eq!(session.skip(), Outcome::Ignored(IgnoreReason::WrongPhase));
        assert_eq!(session.sequencer().skipped().len(), 2);
        assert!(session.sequencer().reviewed().is_empty());
    }

    #[test]
    fn test_huge_delay_still_debounces() {
        let mut session = session_with(vec![card(1, "lang", AnswerMode::Flip)], delayed(u64::MAX));

        assert_eq!(session.reveal_answer(at(0)), Outcome::Applied);
        assert_eq!(
            session.respond(ReviewResponse::Good, at(1)),
            Outcome::Ignored(IgnoreReason::Debounced)
        );
        assert_eq!(
            session.respond(ReviewResponse::Good, at(86_400_000)),
            Outcome::Ignored(IgnoreReason::Debounced)
        );
        assert_eq!(session.mode(), CardMode::Back);
        assert!(session.sequencer().reviewed().is_empty());
    }

    #[test]
    fn test_skip_typed_card_from_front() {
        let mut session = session_with(
            vec![
                card(1, "lang", AnswerMode::Typed),
                card(2, "lang", AnswerMode::Typed),
                card(3, "lang", AnswerMode::Flip),
            ],
            ReviewSettings::default(),
        );
        session.set_typed_answer("half typed");

        assert_eq!(session.skip(), Outcome::Applied);
        assert_eq!(session.current_card().map(|c| c.id), Some(2));
        assert_eq!(session.typed_answer(), "");
        assert_eq!(session.phase(), ReviewPhase::TypedAnswerPendingCheck);

        let alt_s = KeyEvent::new(Key::Char('s')).with_alt();
        assert_eq!(session.handle_key(&alt_s, at(0)), Some(Outcome::Applied));
        assert_eq!(session.current_card().map(|c| c.id), Some(3));

        let ids: Vec<i64> = session.sequencer().skipped().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(session.sequencer().reviewed().is_empty());
    }

    #[test]
    fn test_reset_typed_card_from_front() {
        let mut session = session_with(
            vec![card(1, "lang", AnswerMode::Typed), card(2, "lang", AnswerMode::Flip)],
            ReviewSettings::default(),
        );
        // Plain keys belong to the input field.
        assert_eq!(session.handle_key(&KeyEvent::new(Key::Digit(0)), at(0)), None);
        assert_eq!(session.handle_key(&KeyEvent::new(Key::Char('s')), at(0)), None);

        let alt_0 = KeyEvent::new(Key::Digit(0)).with_alt();
        assert_eq!(session.handle_key(&alt_0, at(0)), Some(Outcome::Applied));

        assert_eq!(session.current_card().map(|c| c.id), Some(2));
        assert_eq!(session.progress().chosen.cards_remaining, 2);
        assert!(session.sequencer().reviewed().is_empty());
        assert!(session.sequencer().skipped().is_empty());
    }

    #[test]
    fn test_skip_last_card_ends_session() {
        let mut session = flip_session(1);
        assert_eq!(session.skip(), Outcome::SessionEnded);
        assert!(session.is_finished());
    }

    #[test]
    fn test_reset_accepted_on_front() {
        let mut session = flip_session(2);

        assert_eq!(session.respond(ReviewResponse::Reset, at(0)), Outcome::Applied);

        assert_eq!(session.current_card().map(|c| c.id), Some(2));
        assert_eq!(session.progress().chosen.cards_remaining, 2);
        assert_eq!(session.progress().chosen.total_cards_in_session, 2);
    }

    #[test]
    fn test_typed_answer_flow() {
        let mut session = session_with(
            vec![card(1, "lang", AnswerMode::Typed), card(2, "lang", AnswerMode::Flip)],
            ReviewSettings::default(),
        );
        assert_eq!(session.phase(), ReviewPhase::TypedAnswerPendingCheck);
        assert_eq!(
            session.reveal_answer(at(0)),
            Outcome::Ignored(IgnoreReason::WrongPhase)
        );

        assert_eq!(session.set_typed_answer(" Back 1 "), Outcome::Applied);
        assert_eq!(session.check_typed_answer(at(10)), Outcome::Applied);

        assert_eq!(session.phase(), ReviewPhase::Back);
        let check = session.last_check().unwrap();
        assert!(check.is_correct);
        assert_eq!(check.user_answer, " Back 1 ");
        assert_eq!(check.edit_distance, 0);
        assert_eq!(crate::diff::correct_text(&check.diff), "back 1");
        assert!(check.diff.iter().any(|s| s.kind == DiffKind::Delete));

        assert_eq!(
            session.set_typed_answer("changed"),
            Outcome::Ignored(IgnoreReason::InputFrozen)
        );
        assert!(session.view().typed_input_frozen);

        session.respond(ReviewResponse::Good, at(20));
        assert_eq!(session.typed_answer(), "");
        assert!(session.last_check().is_none());
        assert_eq!(session.phase(), ReviewPhase::Front);
    }

    #[test]
    fn test_wrong_typed_answer_still_flips() {
        let mut session = session_with(
            vec![card(1, "lang", AnswerMode::Typed)],
            ReviewSettings::default(),
        );
        session.set_typed_answer("bock 1");
        session.check_typed_answer(at(0));

        let check = session.last_check().unwrap();
        assert!(!check.is_correct);
        assert_eq!(check.edit_distance, 1);
        assert_eq!(session.mode(), CardMode::Back);
        assert!(session.view().grade_buttons_visible);
    }

    #[test]
    fn test_typed_answer_rejected_on_flip_card() {
        let mut session = flip_session(1);
        assert_eq!(
            session.set_typed_answer("x"),
            Outcome::Ignored(IgnoreReason::WrongPhase)
        );
        assert_eq!(
            session.check_typed_answer(at(0)),
            Outcome::Ignored(IgnoreReason::WrongPhase)
        );
    }

    #[test]
    fn test_case_sensitivity_from_deck_overrides() {
        let mut deck = DeckOverrides::new(path("lang"));
        deck.case_sensitive_answers = Some(true);
        let mut session = session_with(
            vec![card(1, "lang", AnswerMode::Typed)],
            ReviewSettings::default(),
        )
        .with_deck_overrides(vec![deck]);

        session.set_typed_answer("BACK 1");
        session.check_typed_answer(at(0));
        assert!(!session.last_check().unwrap().is_correct);
    }

    #[test]
    fn test_handle_key_consumes_even_when_ignored() {
        let mut session = session_with(
            (1..=2).map(|id| card(id, "lang", AnswerMode::Flip)).collect(),
            delayed(500),
        );

        assert_eq!(
            session.handle_key(&KeyEvent::new(Key::Space), at(0)),
            Some(Outcome::Applied)
        );
        assert_eq!(
            session.handle_key(&KeyEvent::new(Key::Digit(2)), at(100)),
            Some(Outcome::Ignored(IgnoreReason::Debounced))
        );
        assert_eq!(session.handle_key(&KeyEvent::new(Key::Char('x')), at(600)), None);
        assert_eq!(
            session.handle_key(&KeyEvent::new(Key::Digit(2)), at(600)),
            Some(Outcome::Applied)
        );
        assert_eq!(session.current_card().map(|c| c.id), Some(2));
    }

    #[test]
    fn test_close_freezes_session() {
        let mut session = flip_session(2);
        session.close();

        assert_eq!(session.mode(), CardMode::Closed);
        assert!(!session.is_finished());
        assert_eq!(session.skip(), Outcome::Ignored(IgnoreReason::Closed));
        assert_eq!(
            session.respond(ReviewResponse::Reset, at(0)),
            Outcome::Ignored(IgnoreReason::Closed)
        );
        assert_eq!(session.handle_key(&KeyEvent::new(Key::Space), at(0)), None);
        assert_eq!(session.view(), ViewState::default());
    }

    #[test]
    fn test_response_previews() {
        let mut session = flip_session(1);
        let buttons = session.response_previews();
        let texts: Vec<String> = buttons.iter().map(ResponseButton::text).collect();
        assert_eq!(texts, vec!["Reset", "Hard - 1d", "Good - 3d", "Easy - 4d"]);

        session.settings.show_interval_previews = false;
        assert!(session.response_previews().iter().all(|b| b.interval.is_none()));
    }

    #[derive(Default)]
    struct Recorder {
        rendered: Vec<(String, TextDirection)>,
        messages: Vec<String>,
    }

    impl ContentRenderer for Recorder {
        fn render(&mut self, text: &str, direction: TextDirection) {
            self.rendered.push((text.to_string(), direction));
        }
    }

    impl Notifier for Recorder {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    #[test]
    fn test_render_current_follows_mode() {
        let mut deck = DeckOverrides::new(path("lang"));
        deck.text_direction = Some(TextDirection::Rtl);
        let mut session = flip_session(1).with_deck_overrides(vec![deck]);
        let mut recorder = Recorder::default();

        session.render_current(&mut recorder);
        session.reveal_answer(at(0));
        session.render_current(&mut recorder);

        assert_eq!(
            recorder.rendered,
            vec![
                ("front 1".to_string(), TextDirection::Rtl),
                ("front 1".to_string(), TextDirection::Rtl),
                ("back 1".to_string(), TextDirection::Rtl),
            ]
        );
    }

    #[test]
    fn test_card_info_and_context() {
        let mut reviewed = card(1, "lang", AnswerMode::Flip);
        reviewed.schedule = Some(crate::types::CardSchedule {
            interval_days: 3.0,
            ease_factor: 2.5,
            due: at(0),
            reviews_count: 2,
        });
        let session = session_with(vec![reviewed], ReviewSettings::default());
        let mut recorder = Recorder::default();

        session.show_card_info(&mut recorder);

        assert_eq!(
            recorder.messages,
            vec!["Card 1: ease 2.50, interval 3d, reviews 2, due 2023-11-14".to_string()]
        );
        assert_eq!(session.card_context().as_deref(), Some("lang > notes.md"));
    }
}
