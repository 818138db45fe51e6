//! Target rate for a habit: numerator completions per denominator days.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// How often a habit should be performed, always kept in lowest terms.
///
/// Conventional denominators are 1 (daily), 7 (weekly), 30 (monthly),
/// 92 (quarterly) and 365 (yearly), but any positive pair is accepted.
/// The numerator may exceed the denominator: numeric habits can target
/// more than one completion per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFrequency", into = "RawFrequency")]
pub struct Frequency {
    numerator: u32,
    denominator: u32,
}

impl Frequency {
    /// Build a frequency, rejecting zero on either side.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(CoreError::InvalidFrequency {
                numerator,
                denominator,
            });
        }
        let divisor = gcd(numerator, denominator);
        Ok(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    /// Once per day
    pub fn daily() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }

    /// `times` per week
    pub fn weekly(times: u32) -> Result<Self> {
        Self::new(times, 7)
    }

    /// `times` per 30 days
    pub fn monthly(times: u32) -> Result<Self> {
        Self::new(times, 30)
    }

    pub fn numerator(self) -> u32 {
        self.numerator
    }

    pub fn denominator(self) -> u32 {
        self.denominator
    }

    /// Length in days of one evaluation period
    pub fn days_in_period(self) -> u32 {
        self.denominator
    }

    /// The rate as a plain ratio, completions per day
    pub fn as_ratio(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Wire shape; deserialization re-validates through [`Frequency::new`].
#[derive(Serialize, Deserialize, Clone, Copy)]
struct RawFrequency {
    numerator: u32,
    denominator: u32,
}

impl TryFrom<RawFrequency> for Frequency {
    type Error = CoreError;

    fn try_from(raw: RawFrequency) -> Result<Self> {
        Frequency::new(raw.numerator, raw.denominator)
    }
}

impl From<Frequency> for RawFrequency {
    fn from(frequency: Frequency) -> Self {
        Self {
            numerator: frequency.numerator,
            denominator: frequency.denominator,
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
