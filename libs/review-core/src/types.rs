//! Core types for review sessions.

use crate::error::{Result, ReviewError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Graded response to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewResponse {
    Reset,
    Hard,
    Good,
    Easy,
}

impl ReviewResponse {
    /// All responses in button order.
    pub const ALL: [ReviewResponse; 4] = [Self::Reset, Self::Hard, Self::Good, Self::Easy];

    /// Convert to numeric value (0-3).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Reset => 0,
            Self::Hard => 1,
            Self::Good => 2,
            Self::Easy => 3,
        }
    }

    /// Create from numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Reset),
            1 => Some(Self::Hard),
            2 => Some(Self::Good),
            3 => Some(Self::Easy),
            _ => None,
        }
    }
}

/// How the learner answers a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// Reveal the back with a button or key.
    #[default]
    Flip,
    /// Type the answer and have it checked.
    Typed,
}

/// Text direction hint passed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Slash-separated topic path of a deck, e.g. `lang/french/verbs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeckPath(Vec<String>);

impl DeckPath {
    /// Parse a path, trimming whitespace around each segment.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(ReviewError::EmptyDeckPath);
        }

        let segments: Vec<String> = trimmed.split('/').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ReviewError::EmptyPathSegment {
                path: path.to_string(),
            });
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Last segment, used as the display name.
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// True when `other` is this deck or one of its descendants.
    pub fn contains(&self, other: &DeckPath) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// True when `other` is a strict descendant of this deck.
    pub fn is_ancestor_of(&self, other: &DeckPath) -> bool {
        other.0.len() > self.0.len() && self.contains(other)
    }
}

impl fmt::Display for DeckPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl FromStr for DeckPath {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DeckPath {
    type Error = ReviewError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DeckPath> for String {
    fn from(path: DeckPath) -> Self {
        path.to_string()
    }
}

/// Scheduling data of a card that has been reviewed at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSchedule {
    pub interval_days: f64,
    pub ease_factor: f64,
    pub due: DateTime<Utc>,
    pub reviews_count: u32,
}

/// A card as handed out by the review sequencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub deck_path: DeckPath,
    pub front: String,
    pub back: String,
    pub source_file: String,
    #[serde(default)]
    pub answer_mode: AnswerMode,
    /// `None` for a new card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<CardSchedule>,
}

impl Card {
    pub fn is_new(&self) -> bool {
        self.schedule.is_none()
    }

    pub fn requires_typed_answer(&self) -> bool {
        self.answer_mode == AnswerMode::Typed
    }
}

/// Longest accepted review button delay.
pub const MAX_REVIEW_BUTTON_DELAY_MS: u64 = 10_000;

/// Review settings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    pub case_sensitive_answers: bool,
    /// Minimum interval between two accepted actions.
    pub review_button_delay_ms: u64,
    pub text_direction: TextDirection,
    pub show_interval_previews: bool,
    pub flashcard_reset_text: String,
    pub flashcard_hard_text: String,
    pub flashcard_good_text: String,
    pub flashcard_easy_text: String,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            case_sensitive_answers: false,
            review_button_delay_ms: 0,
            text_direction: TextDirection::default(),
            show_interval_previews: true,
            flashcard_reset_text: "Reset".to_string(),
            flashcard_hard_text: "Hard".to_string(),
            flashcard_good_text: "Good".to_string(),
            flashcard_easy_text: "Easy".to_string(),
        }
    }
}

impl ReviewSettings {
    /// Parse settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.review_button_delay_ms > MAX_REVIEW_BUTTON_DELAY_MS {
            return Err(ReviewError::SettingOutOfRange {
                name: "review_button_delay_ms",
                value: self.review_button_delay_ms,
            });
        }

        let labels = [
            ("flashcard_reset_text", &self.flashcard_reset_text),
            ("flashcard_hard_text", &self.flashcard_hard_text),
            ("flashcard_good_text", &self.flashcard_good_text),
            ("flashcard_easy_text", &self.flashcard_easy_text),
        ];
        for (name, label) in labels {
            if label.trim().is_empty() {
                return Err(ReviewError::EmptyLabel { name });
            }
        }

        Ok(())
    }

    /// Button label for a response.
    pub fn label(&self, response: ReviewResponse) -> &str {
        match response {
            ReviewResponse::Reset => &self.flashcard_reset_text,
            ReviewResponse::Hard => &self.flashcard_hard_text,
            ReviewResponse::Good => &self.flashcard_good_text,
            ReviewResponse::Easy => &self.flashcard_easy_text,
        }
    }

    /// Merge these settings with optional deck overrides.
    pub fn merge(&self, deck: Option<&DeckOverrides>) -> Self {
        match deck {
            Some(d) => Self {
                case_sensitive_answers: d
                    .case_sensitive_answers
                    .unwrap_or(self.case_sensitive_answers),
                review_button_delay_ms: d
                    .review_button_delay_ms
                    .unwrap_or(self.review_button_delay_ms),
                text_direction: d.text_direction.unwrap_or(self.text_direction),
                ..self.clone()
            },
            None => self.clone(),
        }
    }
}

/// Per-deck overrides (all fields optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckOverrides {
    pub deck_path: DeckPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive_answers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_button_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_direction: Option<TextDirection>,
}

impl DeckOverrides {
    /// Create overrides with only the path set.
    pub fn new(deck_path: DeckPath) -> Self {
        Self {
            deck_path,
            case_sensitive_answers: None,
            review_button_delay_ms: None,
            text_direction: None,
        }
    }

    /// Pick the most specific overrides covering `deck`.
    pub fn most_specific<'a>(overrides: &'a [DeckOverrides], deck: &DeckPath) -> Option<&'a Self> {
        overrides
            .iter()
            .filter(|o| o.deck_path.contains(deck))
            .max_by_key(|o| o.deck_path.depth())
    }
}
