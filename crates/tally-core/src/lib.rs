//! # Tally Core Library
//!
//! This library is the derivation engine for the Tally habit tracker.
//! From a sparse, day-indexed log of completion events it derives the
//! three things habit views are built on: a gap-free day-by-day
//! completion status, the lengths and positions of unbroken completion
//! runs, and an exponentially-weighted consistency score.
//!
//! ## Architecture
//!
//! Data flows strictly one way: raw repetitions are expanded into
//! checkmarks, and streaks, scores, and chart buckets are each derived
//! from the checkmark sequence. Every component is a pure function of
//! its inputs -- nothing here performs I/O, caches state, or trusts
//! anything but the raw event log. Persistence, calendar/timezone
//! resolution, and presentation are collaborators on the other side of
//! this crate's boundary.
//!
//! ## Key Components
//!
//! - [`CheckmarkGenerator`]: sliding-window expansion of repetitions
//!   into one checkmark per day
//! - [`StreakFinder`]: maximal completion runs, best-first
//! - [`ScoreCalculator`]: decaying consistency score over the full
//!   history
//! - [`BucketAggregator`]: weekly/monthly/quarterly/yearly regrouping
//!   for charts
//! - [`Frequency`]: "N times per M days" target rates

pub mod bucket;
pub mod checkmark;
pub mod dates;
pub mod error;
pub mod frequency;
pub mod habit;
pub mod repetition;
pub mod score;
pub mod streak;

pub use bucket::{BucketAggregator, BucketSize};
pub use checkmark::{Checkmark, CheckmarkGenerator, CheckmarkValue};
pub use dates::{block_index, block_range, DayIndex, Weekday};
pub use error::{CoreError, Result, SequenceError};
pub use frequency::Frequency;
pub use habit::{Habit, HabitKind};
pub use repetition::{validate_sequence, Completion, Repetition, RepetitionValue};
pub use score::{Score, ScoreCalculator, ScoreParams};
pub use streak::{Streak, StreakFinder, StreakList};
