//! Day indices, weekdays, and sliding-window block alignment.
//!
//! The whole derivation core runs on integer day indices; resolving a
//! wall-clock instant to a day in the user's locale happens before data
//! enters this crate. Conversions to and from calendar dates live here
//! so that the rest of the library never touches `chrono` directly.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days between 0001-01-01 (chrono's common-era day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// A calendar day, counted as days since 1970-01-01.
///
/// Timezone-naive: two users in different timezones may map the same
/// instant to different day indices, and that mapping is the calendar
/// collaborator's problem, not ours.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct DayIndex(i64);

impl DayIndex {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// The day `days` after this one (negative values go backward)
    pub const fn offset(self, days: i64) -> Self {
        Self(self.0 + days)
    }

    /// Signed distance from this day to `other`
    pub const fn days_until(self, other: DayIndex) -> i64 {
        other.0 - self.0
    }

    /// Weekday of this day. Day 0 (1970-01-01) is a Thursday.
    pub fn weekday(self) -> Weekday {
        Weekday::from_index((self.0 + 4).rem_euclid(7) as u8)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE)
    }

    /// Calendar date for this index, or `None` outside chrono's range
    pub fn to_date(self) -> Option<NaiveDate> {
        i32::try_from(self.0 + UNIX_EPOCH_DAYS_FROM_CE)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
    }

    /// Iterate every day from `first` through `last`, inclusive
    pub fn range_inclusive(first: DayIndex, last: DayIndex) -> impl Iterator<Item = DayIndex> {
        (first.0..=last.0).map(DayIndex)
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day of the week, Sunday = 0 through Saturday = 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Weekday for an index, taken modulo 7
    pub fn from_index(index: u8) -> Self {
        match index % 7 {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            _ => unreachable!(),
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        Self::from_index(weekday.num_days_from_sunday() as u8)
    }
}

impl Default for Weekday {
    fn default() -> Self {
        Self::Sunday
    }
}

/// Offset that shifts day indices so weekly blocks begin on `first_weekday`.
fn week_shift(first_weekday: Weekday) -> i64 {
    // Day 0 is a Thursday (index 4).
    (4 - i64::from(first_weekday.index())).rem_euclid(7)
}

/// Index of the sliding-window block containing `day`.
///
/// Weekly blocks (denominator 7) are anchored so boundaries fall on
/// `first_weekday`; any other denominator anchors block 0 at day 0.
/// Boundaries are absolute, never derived from the queried range, so
/// disjoint ranges of the same habit always agree on them.
pub fn block_index(day: DayIndex, denominator: u32, first_weekday: Weekday) -> i64 {
    let len = i64::from(denominator.max(1));
    if len == 7 {
        (day.value() + week_shift(first_weekday)).div_euclid(7)
    } else {
        day.value().div_euclid(len)
    }
}

/// First and last day of the block containing `day`
pub fn block_range(day: DayIndex, denominator: u32, first_weekday: Weekday) -> (DayIndex, DayIndex) {
    let len = i64::from(denominator.max(1));
    let block = block_index(day, denominator, first_weekday);
    let start = if len == 7 {
        block * 7 - week_shift(first_weekday)
    } else {
        block * len
    };
    (DayIndex::new(start), DayIndex::new(start + len - 1))
}
