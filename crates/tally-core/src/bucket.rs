//! Chart-scale aggregation of checkmark sequences.
//!
//! Thin composition over [`CheckmarkGenerator::group_by`]: fixed bucket
//! sizes for the supported chart scales, plus target scaling so a
//! per-day numeric target can be projected onto a whole bucket.

use serde::{Deserialize, Serialize};

use crate::checkmark::{Checkmark, CheckmarkGenerator};
use crate::habit::Habit;

/// Supported aggregation scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketSize {
    /// No bucketing
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl BucketSize {
    pub const ALL: [BucketSize; 5] = [
        BucketSize::Day,
        BucketSize::Week,
        BucketSize::Month,
        BucketSize::Quarter,
        BucketSize::Year,
    ];

    /// Bucket length in days
    pub fn days(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 31,
            Self::Quarter => 92,
            Self::Year => 365,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.days() == days)
    }
}

/// Regroups daily checkmarks into coarser periods for chart consumption
#[derive(Debug, Clone)]
pub struct BucketAggregator {
    generator: CheckmarkGenerator,
    per_day_target: f64,
}

impl BucketAggregator {
    pub fn new(generator: CheckmarkGenerator, per_day_target: f64) -> Self {
        Self {
            generator,
            per_day_target,
        }
    }

    pub fn for_habit(habit: &Habit) -> Self {
        Self::new(CheckmarkGenerator::for_habit(habit), habit.per_day_target())
    }

    /// One aggregated checkmark per bucket, stamped on the bucket's
    /// last day
    pub fn aggregate(&self, checkmarks: &[Checkmark], size: BucketSize) -> Vec<Checkmark> {
        self.generator.group_by(checkmarks, size.days())
    }

    /// The numeric target projected onto a whole bucket
    pub fn scaled_target(&self, size: BucketSize) -> f64 {
        self.per_day_target * f64::from(size.days())
    }
}
