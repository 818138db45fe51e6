//! Recorded habit events and their validation.
//!
//! A repetition is one record per day: either a completion status
//! (boolean habits) or a measured quantity (numeric habits). The
//! persistence collaborator supplies them day-ascending and unique per
//! day; [`validate_sequence`] checks that contract and fails fast when
//! it is broken.

use serde::{Deserialize, Serialize};

use crate::dates::DayIndex;
use crate::error::{Result, SequenceError};

/// Completion status of a boolean habit on one day.
///
/// `auto` marks a day credited by sliding-window evaluation rather than
/// an explicit user action. The legacy single-column encoding is kept
/// available through [`code`](Completion::code) for collaborators that
/// still store the packed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    NotDone,
    Yes { auto: bool },
    Skip,
}

impl Completion {
    /// Packed wire code: 0 not done, 1 yes (auto), 2 yes (manual), 3 skip
    pub fn code(self) -> u8 {
        match self {
            Self::NotDone => 0,
            Self::Yes { auto: true } => 1,
            Self::Yes { auto: false } => 2,
            Self::Skip => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NotDone),
            1 => Some(Self::Yes { auto: true }),
            2 => Some(Self::Yes { auto: false }),
            3 => Some(Self::Skip),
            _ => None,
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes { .. })
    }
}

/// Value carried by a repetition, covering both habit kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepetitionValue {
    /// Boolean habits: what happened that day
    Status(Completion),
    /// Numeric habits: non-negative amount in habit-defined units
    Quantity(f64),
}

impl RepetitionValue {
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Status(status) if status.is_yes())
    }

    pub fn is_skip(self) -> bool {
        matches!(self, Self::Status(Completion::Skip))
    }

    pub fn quantity(self) -> Option<f64> {
        match self {
            Self::Quantity(amount) => Some(amount),
            Self::Status(_) => None,
        }
    }
}

/// One recorded event: a habit was (or explicitly was not) performed on a day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repetition {
    pub day: DayIndex,
    pub value: RepetitionValue,
}

impl Repetition {
    /// An explicit user check
    pub fn yes(day: DayIndex) -> Self {
        Self {
            day,
            value: RepetitionValue::Status(Completion::Yes { auto: false }),
        }
    }

    /// A completion credited automatically
    pub fn yes_auto(day: DayIndex) -> Self {
        Self {
            day,
            value: RepetitionValue::Status(Completion::Yes { auto: true }),
        }
    }

    pub fn skip(day: DayIndex) -> Self {
        Self {
            day,
            value: RepetitionValue::Status(Completion::Skip),
        }
    }

    pub fn not_done(day: DayIndex) -> Self {
        Self {
            day,
            value: RepetitionValue::Status(Completion::NotDone),
        }
    }

    /// A measured amount for a numeric habit
    pub fn quantity(day: DayIndex, amount: f64) -> Self {
        Self {
            day,
            value: RepetitionValue::Quantity(amount),
        }
    }
}

/// Check the day-ascending, unique-per-day contract.
///
/// Duplicates and reordering are reported, never repaired: a habit log
/// that has been silently "fixed" is worse than an error.
pub fn validate_sequence(repetitions: &[Repetition]) -> Result<(), SequenceError> {
    for pair in repetitions.windows(2) {
        let (prev, next) = (pair[0].day, pair[1].day);
        if next == prev {
            return Err(SequenceError::DuplicateDay { day: next });
        }
        if next < prev {
            return Err(SequenceError::OutOfOrder { prev, next });
        }
    }
    Ok(())
}
