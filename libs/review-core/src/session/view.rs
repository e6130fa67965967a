//! Pure projection from session state to what the shell shows.

use super::progress::DeckProgressSnapshot;
use super::ReviewPhase;
use crate::types::AnswerMode;
use serde::Serialize;

/// Visibility flags and counters for the review view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub answer_visible: bool,
    pub reveal_button_visible: bool,
    pub check_button_visible: bool,
    pub typed_input_visible: bool,
    pub typed_input_frozen: bool,
    pub grade_buttons_visible: bool,
    pub reset_button_visible: bool,
    pub skip_button_visible: bool,
    pub chosen_deck_counter: String,
    pub chosen_subdeck_counter: Option<String>,
    pub current_deck_counter: Option<String>,
}

pub fn project_view(
    phase: ReviewPhase,
    answer_mode: AnswerMode,
    progress: &DeckProgressSnapshot,
) -> ViewState {
    if phase == ReviewPhase::Closed {
        return ViewState::default();
    }

    let typed = answer_mode == AnswerMode::Typed;
    let front = matches!(phase, ReviewPhase::Front | ReviewPhase::TypedAnswerPendingCheck);
    let back = phase == ReviewPhase::Back;

    ViewState {
        answer_visible: back,
        reveal_button_visible: phase == ReviewPhase::Front && !typed,
        check_button_visible: phase == ReviewPhase::TypedAnswerPendingCheck,
        typed_input_visible: typed,
        typed_input_frozen: typed && back,
        grade_buttons_visible: back,
        reset_button_visible: true,
        skip_button_visible: front,
        chosen_deck_counter: progress.chosen.cards_label(),
        chosen_subdeck_counter: progress
            .current
            .map(|_| progress.chosen.subdecks_label()),
        current_deck_counter: progress.current.map(|p| p.cards_label()),
    }
}
