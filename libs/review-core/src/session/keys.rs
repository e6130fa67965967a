//! Keyboard routing for review sessions.
//!
//! Front of a flip card: Space / Enter reveal, `s` skips, `0` resets.
//! Back: `1` Hard, `2` or Space Good, `3` Easy, `0` Reset.
//! A typed-answer card waiting for its check takes Enter to check, Alt+`s` to
//! skip and Alt+`0` to reset. Unmodified letters and digits reach the input
//! field.

use super::ReviewPhase;
use crate::types::ReviewResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    NumpadEnter,
    /// Top-row digit.
    Digit(u8),
    Numpad(u8),
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    fn has_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }

    fn alt_only(&self) -> bool {
        self.alt && !self.ctrl && !self.meta
    }

    fn digit(&self) -> Option<u8> {
        match self.key {
            Key::Digit(d) | Key::Numpad(d) => Some(d),
            _ => None,
        }
    }
}

/// A user action on the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RevealAnswer,
    CheckTypedAnswer,
    Respond(ReviewResponse),
    Skip,
}

/// Map a key to the action it triggers in `phase`.
///
/// `Some` means the caller should consume the event, even when the action
/// ends up ignored by the session.
pub fn route_key(event: &KeyEvent, phase: ReviewPhase) -> Option<Action> {
    if phase == ReviewPhase::TypedAnswerPendingCheck && event.alt_only() {
        return match (event.key, event.digit()) {
            (Key::Char('s') | Key::Char('S'), _) => Some(Action::Skip),
            (_, Some(0)) => Some(Action::Respond(ReviewResponse::Reset)),
            _ => None,
        };
    }
    if event.has_modifier() {
        return None;
    }

    match phase {
        ReviewPhase::Front => match event.key {
            Key::Space | Key::Enter | Key::NumpadEnter => Some(Action::RevealAnswer),
            Key::Char('s') | Key::Char('S') => Some(Action::Skip),
            _ if event.digit() == Some(0) => Some(Action::Respond(ReviewResponse::Reset)),
            _ => None,
        },
        ReviewPhase::TypedAnswerPendingCheck => match event.key {
            Key::Enter | Key::NumpadEnter => Some(Action::CheckTypedAnswer),
            _ => None,
        },
        ReviewPhase::Back => match (event.key, event.digit()) {
            (Key::Space, _) => Some(Action::Respond(ReviewResponse::Good)),
            (_, Some(d)) => ReviewResponse::from_value(d).map(Action::Respond),
            _ => None,
        },
        ReviewPhase::Closed => None,
    }
}
