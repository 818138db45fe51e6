//! Exponentially-weighted consistency score.
//!
//! The score is a smoothed measure of recent consistency in [0, 1]: it
//! rises toward 1 under sustained completion and decays toward 0 under
//! neglect. The decay half-life scales with the habit's frequency, so a
//! weekly habit is not punished as quickly as a daily one for a single
//! missed day.
//!
//! There is no incremental update path on purpose. Editing a repetition
//! deep in the past changes every score after it, so recomputation is
//! always whole-history, oldest to newest.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::checkmark::{Checkmark, CheckmarkValue};
use crate::dates::DayIndex;
use crate::frequency::Frequency;
use crate::habit::{Habit, HabitKind};

/// Consistency score of one day, in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub day: DayIndex,
    pub value: f64,
}

/// Tunable constants for the decay curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreParams {
    /// Half-life in days for a daily habit; coarser frequencies scale it
    /// up by `1 / sqrt(frequency)`. 13.0 means a daily habit loses half
    /// its score after 13 untouched days.
    pub half_life_scale: f64,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            half_life_scale: 13.0,
        }
    }
}

/// Computes per-day consistency scores from a checkmark sequence.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    kind: HabitKind,
    frequency: Frequency,
    per_day_target: f64,
    params: ScoreParams,
}

impl ScoreCalculator {
    pub fn new(kind: HabitKind, frequency: Frequency, per_day_target: f64) -> Self {
        Self {
            kind,
            frequency,
            per_day_target,
            params: ScoreParams::default(),
        }
    }

    pub fn for_habit(habit: &Habit) -> Self {
        Self::new(habit.kind, habit.frequency, habit.per_day_target())
    }

    pub fn with_params(mut self, params: ScoreParams) -> Self {
        self.params = params;
        self
    }

    /// Days for half the score to drain away with no completions
    pub fn half_life(&self) -> f64 {
        self.params.half_life_scale / self.frequency.as_ratio().sqrt()
    }

    /// Fraction of yesterday's score carried into today
    pub fn decay_per_day(&self) -> f64 {
        0.5_f64.powf(1.0 / self.half_life())
    }

    /// Compute one score per checkmark, oldest to newest, seeded at 0.
    ///
    /// `checkmarks` must be the habit's full history in ascending order;
    /// scoring a suffix would silently forget the prefix it decays from.
    pub fn compute(&self, checkmarks: &[Checkmark]) -> Vec<Score> {
        let decay = self.decay_per_day();
        debug!(
            "scoring {} days, half-life {:.1}",
            checkmarks.len(),
            self.half_life()
        );

        let mut scores = Vec::with_capacity(checkmarks.len());
        let mut previous = 0.0;
        for mark in checkmarks {
            previous = previous * decay + self.raw_value(mark.value) * (1.0 - decay);
            scores.push(Score {
                day: mark.day,
                value: previous,
            });
        }
        scores
    }

    /// The most recent score, or 0 for an empty history
    pub fn latest(&self, checkmarks: &[Checkmark]) -> f64 {
        self.compute(checkmarks)
            .last()
            .map(|score| score.value)
            .unwrap_or(0.0)
    }

    /// Daily attainment in [0, 1] fed into the decay recurrence
    fn raw_value(&self, value: CheckmarkValue) -> f64 {
        match (self.kind, value) {
            (HabitKind::Boolean, status) => {
                if status.is_counted_completion() {
                    1.0
                } else {
                    0.0
                }
            }
            (HabitKind::Numeric, CheckmarkValue::Quantity(amount)) => {
                if self.per_day_target > 0.0 {
                    (amount / self.per_day_target).min(1.0)
                } else {
                    0.0
                }
            }
            (HabitKind::Numeric, CheckmarkValue::Status { .. }) => 0.0,
        }
    }
}
