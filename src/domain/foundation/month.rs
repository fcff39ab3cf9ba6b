//! Calendar month value object.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Returns the month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of months since year zero; consecutive months differ by one.
    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Returns the month `offset` months away (negative goes back).
    pub fn shifted(&self, offset: i64) -> Self {
        Self::from_ordinal(self.ordinal() + offset)
    }

    /// Inclusive count of calendar months from `start` to `end`.
    ///
    /// January to January is one month. Zero or negative when `end` precedes `start`.
    pub fn span_inclusive(start: Month, end: Month) -> i64 {
        end.ordinal() - start.ordinal() + 1
    }

    /// All months from `start` to `end` inclusive; empty when `end` precedes `start`.
    pub fn range_inclusive(start: Month, end: Month) -> Vec<Month> {
        (start.ordinal()..=end.ordinal())
            .map(Self::from_ordinal)
            .collect()
    }

    /// The first day of this month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
