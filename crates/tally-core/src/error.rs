//! Core error types for tally-core.
//!
//! Every failure in this crate is a local, synchronous validation error:
//! the library performs no I/O, so there is nothing to retry. Inputs that
//! violate a structural invariant are rejected at the point of detection
//! rather than silently corrected.

use thiserror::Error;

use crate::dates::DayIndex;

/// Core error type for tally-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A frequency term was zero
    #[error("invalid frequency {numerator}/{denominator}: both terms must be at least 1")]
    InvalidFrequency { numerator: u32, denominator: u32 },

    /// A day range ended before it began
    #[error("invalid day range: last day {last} is before first day {first}")]
    InvalidRange { first: DayIndex, last: DayIndex },

    /// The supplied repetition list broke the day-ascending-unique contract
    #[error("malformed repetition sequence: {0}")]
    MalformedRepetitionSequence(#[from] SequenceError),
}

/// Structural defects in a repetition sequence.
///
/// The persistence collaborator owns ordering and uniqueness; these
/// variants report its contract being broken, not a condition this
/// library will repair.
#[derive(Error, Debug)]
pub enum SequenceError {
    /// Days must be strictly ascending
    #[error("day {next} follows day {prev}; repetitions must be day-ascending")]
    OutOfOrder { prev: DayIndex, next: DayIndex },

    /// At most one repetition per day
    #[error("more than one repetition recorded for day {day}")]
    DuplicateDay { day: DayIndex },

    /// A boolean habit received a quantity, or a numeric habit a status
    #[error("repetition value on day {day} does not match the habit kind")]
    KindMismatch { day: DayIndex },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
