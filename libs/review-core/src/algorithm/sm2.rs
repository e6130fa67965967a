//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with configurable parameters. There is no learning
//! step: a new card graduates on its first graded review, and Reset sends
//! any card back to new.

use super::SchedulingAlgorithm;
use crate::types::{CardSchedule, ReviewResponse};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub easy_bonus: f64,
    pub hard_multiplier: f64,
    pub hard_interval: f64,
    pub graduating_interval: f64,
    pub easy_interval: f64,
    /// Upper bound on any interval, in days.
    pub maximum_interval: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            easy_bonus: 1.3,
            hard_multiplier: 1.2,
            hard_interval: 1.0,
            graduating_interval: 3.0,
            easy_interval: 4.0,
            maximum_interval: 36_500.0,
        }
    }
}

impl SchedulingAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn next_interval(&self, schedule: Option<&CardSchedule>, response: ReviewResponse) -> Option<f64> {
        self.next_interval_and_ease(schedule, response)
            .map(|(interval, _)| interval)
    }

    fn schedule(
        &self,
        schedule: Option<&CardSchedule>,
        response: ReviewResponse,
        now: DateTime<Utc>,
    ) -> Option<CardSchedule> {
        let (interval_days, ease_factor) = self.next_interval_and_ease(schedule, response)?;

        let due = Duration::try_days(interval_days.ceil() as i64)
            .and_then(|days| now.checked_add_signed(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Some(CardSchedule {
            interval_days,
            ease_factor,
            due,
            reviews_count: schedule.map_or(0, |s| s.reviews_count) + 1,
        })
    }
}

impl Sm2 {
    fn next_interval_and_ease(
        &self,
        schedule: Option<&CardSchedule>,
        response: ReviewResponse,
    ) -> Option<(f64, f64)> {
        let (interval, ease) = match (schedule, response) {
            (_, ReviewResponse::Reset) => return None,
            (None, response) => self.schedule_new(response),
            (Some(state), response) => self.schedule_review(state, response),
        };
        Some((interval.min(self.maximum_interval), ease))
    }

    fn schedule_new(&self, response: ReviewResponse) -> (f64, f64) {
        match response {
            ReviewResponse::Hard => (
                self.hard_interval,
                (self.initial_ease - 0.15).max(self.minimum_ease),
            ),
            ReviewResponse::Easy => (self.easy_interval, self.initial_ease + 0.15),
            _ => (self.graduating_interval, self.initial_ease),
        }
    }

    fn schedule_review(&self, state: &CardSchedule, response: ReviewResponse) -> (f64, f64) {
        let ease_adj = match response {
            ReviewResponse::Hard => -0.15,
            ReviewResponse::Easy => 0.15,
            _ => 0.0,
        };
        let multiplier = match response {
            ReviewResponse::Hard => self.hard_multiplier,
            ReviewResponse::Easy => state.ease_factor * self.easy_bonus,
            _ => state.ease_factor,
        };
        let new_interval = (state.interval_days * multiplier).max(1.0);
        let new_ease = (state.ease_factor + ease_adj).max(self.minimum_ease);
        (new_interval, new_ease)
    }
}
