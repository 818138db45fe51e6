//! Maximal completion runs over a checkmark sequence.

use serde::{Deserialize, Serialize};

use crate::checkmark::{Checkmark, CheckmarkValue};
use crate::dates::DayIndex;
use crate::habit::{Habit, HabitKind};

/// An unbroken run of completed (or skipped-but-bridged) days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub start: DayIndex,
    pub end: DayIndex,
}

impl Streak {
    pub fn length(self) -> i64 {
        self.start.days_until(self.end) + 1
    }

    pub fn contains(self, day: DayIndex) -> bool {
        day >= self.start && day <= self.end
    }
}

/// Streaks of one habit, ordered by length descending with ties broken
/// by the more recent end day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakList {
    streaks: Vec<Streak>,
}

impl StreakList {
    pub fn all(&self) -> &[Streak] {
        &self.streaks
    }

    /// The top `n` streaks
    pub fn best(&self, n: usize) -> Vec<Streak> {
        self.streaks.iter().take(n).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }
}

/// How a single day affects a running streak
enum DayEffect {
    /// Extends the run and makes it a real streak
    Completes,
    /// Extends the run without contributing a completion
    Bridges,
    /// Ends the run
    Breaks,
}

/// Scans a checkmark sequence once and collects maximal runs.
///
/// A run is every consecutive day whose status is yes (counted or not)
/// or skip, bounded by not-done days or the sequence edges; a run made
/// of skips alone is discarded. For numeric habits a day completes when
/// its quantity reaches the per-day target, and there is no skip.
#[derive(Debug, Clone)]
pub struct StreakFinder {
    per_day_target: f64,
}

impl StreakFinder {
    pub fn new() -> Self {
        Self {
            per_day_target: 1.0,
        }
    }

    pub fn for_habit(habit: &Habit) -> Self {
        match habit.kind {
            HabitKind::Boolean => Self::new(),
            HabitKind::Numeric => Self::new().with_target(habit.per_day_target()),
        }
    }

    /// Per-day quantity threshold for numeric habits
    pub fn with_target(mut self, per_day_target: f64) -> Self {
        self.per_day_target = per_day_target;
        self
    }

    /// Find all maximal runs in an ascending checkmark sequence
    pub fn find(&self, checkmarks: &[Checkmark]) -> StreakList {
        let mut streaks = Vec::new();
        let mut run_start: Option<DayIndex> = None;
        let mut run_end = DayIndex::default();
        let mut has_completion = false;

        for mark in checkmarks {
            match self.effect(mark.value) {
                DayEffect::Breaks => {
                    if let (Some(start), true) = (run_start, has_completion) {
                        streaks.push(Streak {
                            start,
                            end: run_end,
                        });
                    }
                    run_start = None;
                    has_completion = false;
                }
                effect => {
                    if run_start.is_none() {
                        run_start = Some(mark.day);
                    }
                    run_end = mark.day;
                    if matches!(effect, DayEffect::Completes) {
                        has_completion = true;
                    }
                }
            }
        }
        if let (Some(start), true) = (run_start, has_completion) {
            streaks.push(Streak {
                start,
                end: run_end,
            });
        }

        streaks.sort_by(|a, b| {
            b.length()
                .cmp(&a.length())
                .then_with(|| b.end.cmp(&a.end))
        });
        StreakList { streaks }
    }

    fn effect(&self, value: CheckmarkValue) -> DayEffect {
        match value {
            CheckmarkValue::Status { completion, .. } if completion.is_yes() => DayEffect::Completes,
            value if value.is_skip() => DayEffect::Bridges,
            CheckmarkValue::Quantity(amount)
                if self.per_day_target > 0.0 && amount >= self.per_day_target =>
            {
                DayEffect::Completes
            }
            _ => DayEffect::Breaks,
        }
    }
}

impl Default for StreakFinder {
    fn default() -> Self {
        Self::new()
    }
}
