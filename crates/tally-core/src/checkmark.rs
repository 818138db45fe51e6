//! Per-day checkmark derivation.
//!
//! This is the most intricate component of the crate: it reconciles an
//! arbitrary "N times per M days" target with the daily calendar. For a
//! requested range it emits exactly one checkmark per day, no gaps, by
//! overlaying explicit repetitions onto a blank sequence and then, for
//! non-daily boolean habits, running sliding-window block evaluation to
//! decide which yes days actually count toward the target.
//!
//! Everything downstream (streaks, scores, buckets) consumes this
//! output; nothing here is cached, and regenerating from the same
//! inputs always yields the same sequence.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dates::{block_index, DayIndex, Weekday};
use crate::error::{CoreError, Result, SequenceError};
use crate::frequency::Frequency;
use crate::habit::{Habit, HabitKind};
use crate::repetition::{validate_sequence, Completion, Repetition, RepetitionValue};

/// Derived value of one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckmarkValue {
    /// Boolean habits: status plus whether the day is one of the
    /// completions credited against the target in its block
    Status { completion: Completion, counted: bool },
    /// Numeric habits: quantity attributed to the day, 0.0 when absent
    Quantity(f64),
}

impl CheckmarkValue {
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Status { completion, .. } if completion.is_yes())
    }

    pub fn is_skip(self) -> bool {
        matches!(
            self,
            Self::Status {
                completion: Completion::Skip,
                ..
            }
        )
    }

    /// A yes day credited against the target
    pub fn is_counted_completion(self) -> bool {
        matches!(self, Self::Status { completion, counted: true } if completion.is_yes())
    }

    pub fn quantity(self) -> Option<f64> {
        match self {
            Self::Quantity(amount) => Some(amount),
            Self::Status { .. } => None,
        }
    }
}

/// Completion status or quantity for a single day of a habit's history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkmark {
    pub day: DayIndex,
    pub value: CheckmarkValue,
}

impl Checkmark {
    /// Packed status code (0..=3) for boolean habits, `None` for quantities
    pub fn code(self) -> Option<u8> {
        match self.value {
            CheckmarkValue::Status { completion, .. } => Some(completion.code()),
            CheckmarkValue::Quantity(_) => None,
        }
    }
}

/// Turns a sparse repetition log into a gap-free per-day sequence.
///
/// Pure and stateless: the same repetitions and range always produce
/// the same output, so callers may cache results keyed by a fingerprint
/// of the inputs and may run generators for different habits or ranges
/// concurrently without coordination.
#[derive(Debug, Clone)]
pub struct CheckmarkGenerator {
    kind: HabitKind,
    frequency: Frequency,
    first_weekday: Weekday,
}

impl CheckmarkGenerator {
    pub fn new(kind: HabitKind, frequency: Frequency, first_weekday: Weekday) -> Self {
        Self {
            kind,
            frequency,
            first_weekday,
        }
    }

    pub fn for_habit(habit: &Habit) -> Self {
        Self::new(habit.kind, habit.frequency, habit.first_weekday)
    }

    pub fn kind(&self) -> HabitKind {
        self.kind
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Produce one checkmark per day over `[first, last]`, inclusive.
    ///
    /// Repetitions outside the range still participate in sliding-window
    /// evaluation when their block overlaps it, but entries beyond
    /// `last` are invisible: a block whose final day is still in the
    /// future is judged on elapsed days only, and an empty open block
    /// stays all-NotDone rather than being treated as a failure.
    pub fn generate(
        &self,
        repetitions: &[Repetition],
        first: DayIndex,
        last: DayIndex,
    ) -> Result<Vec<Checkmark>> {
        if last < first {
            return Err(CoreError::InvalidRange { first, last });
        }
        validate_sequence(repetitions)?;
        for rep in repetitions {
            let matches_kind = matches!(
                (self.kind, rep.value),
                (HabitKind::Boolean, RepetitionValue::Status(_))
                    | (HabitKind::Numeric, RepetitionValue::Quantity(_))
            );
            if !matches_kind {
                return Err(SequenceError::KindMismatch { day: rep.day }.into());
            }
        }

        let blank = match self.kind {
            HabitKind::Boolean => CheckmarkValue::Status {
                completion: Completion::NotDone,
                counted: false,
            },
            HabitKind::Numeric => CheckmarkValue::Quantity(0.0),
        };
        let mut checkmarks: Vec<Checkmark> = DayIndex::range_inclusive(first, last)
            .map(|day| Checkmark { day, value: blank })
            .collect();

        for rep in repetitions {
            if rep.day < first || rep.day > last {
                continue;
            }
            let index = first.days_until(rep.day) as usize;
            checkmarks[index].value = match rep.value {
                RepetitionValue::Status(completion) => CheckmarkValue::Status {
                    completion,
                    counted: false,
                },
                RepetitionValue::Quantity(amount) => CheckmarkValue::Quantity(amount),
            };
        }

        if self.kind == HabitKind::Boolean {
            if self.frequency.days_in_period() > 1 {
                self.mark_counted(&mut checkmarks, repetitions, first, last);
            } else {
                // Daily target: every yes is a counted completion.
                for mark in &mut checkmarks {
                    if let CheckmarkValue::Status { completion, counted } = &mut mark.value {
                        *counted = completion.is_yes();
                    }
                }
            }
        }

        debug!(
            "generated {} checkmarks for days {}..={}",
            checkmarks.len(),
            first,
            last
        );
        Ok(checkmarks)
    }

    /// Sliding-window evaluation for non-daily boolean habits.
    ///
    /// Yes days are grouped by block; within each block the most recent
    /// `numerator` of them become the counted completions, and any
    /// surplus older yes days stay yes-but-uncounted.
    fn mark_counted(
        &self,
        checkmarks: &mut [Checkmark],
        repetitions: &[Repetition],
        first: DayIndex,
        last: DayIndex,
    ) {
        let keep = self.frequency.numerator() as usize;
        let period = self.frequency.days_in_period();

        let mut yes_days_by_block: BTreeMap<i64, Vec<DayIndex>> = BTreeMap::new();
        for rep in repetitions {
            if rep.day > last {
                break; // not visible from this range yet
            }
            if rep.value.is_yes() {
                let block = block_index(rep.day, period, self.first_weekday);
                yes_days_by_block.entry(block).or_default().push(rep.day);
            }
        }

        for yes_days in yes_days_by_block.values() {
            // Days arrive ascending, so the counted ones are the tail.
            let surplus = yes_days.len().saturating_sub(keep);
            for day in &yes_days[surplus..] {
                if *day < first || *day > last {
                    continue;
                }
                let index = first.days_until(*day) as usize;
                if let CheckmarkValue::Status { counted, .. } = &mut checkmarks[index].value {
                    *counted = true;
                }
            }
        }
    }

    /// Regroup a daily sequence into buckets of `bucket_days` days,
    /// summing quantities (numeric) or counting yes days (boolean).
    ///
    /// Weekly buckets align to the generator's first weekday; other
    /// sizes are counted off from the start of the sequence. Each
    /// bucket is reported on its last day present in the input. This
    /// is chart-scale output only and never feeds back into streak or
    /// score computation.
    pub fn group_by(&self, checkmarks: &[Checkmark], bucket_days: u32) -> Vec<Checkmark> {
        if checkmarks.is_empty() || bucket_days <= 1 {
            return checkmarks.to_vec();
        }
        let anchor = checkmarks[0].day;
        let bucket_of = |day: DayIndex| -> i64 {
            if bucket_days == 7 {
                block_index(day, 7, self.first_weekday)
            } else {
                anchor.days_until(day).div_euclid(i64::from(bucket_days))
            }
        };

        let mut buckets = Vec::new();
        let mut current = bucket_of(anchor);
        let mut sum = 0.0;
        let mut last_day = anchor;
        for mark in checkmarks {
            let bucket = bucket_of(mark.day);
            if bucket != current {
                buckets.push(Checkmark {
                    day: last_day,
                    value: CheckmarkValue::Quantity(sum),
                });
                current = bucket;
                sum = 0.0;
            }
            sum += match mark.value {
                CheckmarkValue::Quantity(amount) => amount,
                CheckmarkValue::Status { completion, .. } if completion.is_yes() => 1.0,
                CheckmarkValue::Status { .. } => 0.0,
            };
            last_day = mark.day;
        }
        buckets.push(Checkmark {
            day: last_day,
            value: CheckmarkValue::Quantity(sum),
        });
        buckets
    }
}
