//! Habit metadata consumed by the derivation components.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::Weekday;
use crate::frequency::Frequency;

/// Whether a habit is checked off or measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitKind {
    /// Yes/no habits ("Did you exercise?")
    Boolean,
    /// Quantity habits ("How many pages did you read?")
    Numeric,
}

/// A recurring habit.
///
/// Only the fields the derivation core reads are kept here; colors,
/// ordering, and reminder settings belong to the surrounding
/// application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Prompt shown when checking the habit off ("Did you meditate today?")
    pub question: String,
    pub kind: HabitKind,
    pub frequency: Frequency,
    /// Target amount per period, in `unit`, for numeric habits
    pub target_value: f64,
    pub unit: String,
    /// Anchors weekly sliding-window blocks and weekly buckets
    pub first_weekday: Weekday,
    pub archived: bool,
}

impl Habit {
    /// Create a yes/no habit
    pub fn boolean(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            question: String::new(),
            kind: HabitKind::Boolean,
            frequency,
            target_value: 1.0,
            unit: String::new(),
            first_weekday: Weekday::default(),
            archived: false,
        }
    }

    /// Create a numeric habit with a daily target
    pub fn numeric(name: impl Into<String>, target_value: f64, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            question: String::new(),
            kind: HabitKind::Numeric,
            frequency: Frequency::daily(),
            target_value,
            unit: unit.into(),
            first_weekday: Weekday::default(),
            archived: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    /// Target amount attributed to a single day.
    ///
    /// The stored target covers one whole period, so a "70 pages per
    /// week" habit has a per-day target of 10.
    pub fn per_day_target(&self) -> f64 {
        self.target_value / f64::from(self.frequency.days_in_period())
    }
}
