// crates/types/src/period.rs
//! Time periods as they appear in Eurostat-style statistical tables.
//!
//! Periods are either a whole year (`"2020"`) or a specific month
//! (`"2020M03"`). Ordering is chronological, with an annual period
//! sorting before any month of the same year.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a period string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePeriodError {
    #[error("empty period string")]
    Empty,
    #[error("invalid year in period '{input}'")]
    InvalidYear { input: String },
    #[error("invalid month in period '{input}': expected 1-12")]
    InvalidMonth { input: String },
}

/// A reporting period: a calendar year or a single month within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TimePeriod {
    Year(i32),
    Month { year: i32, month: u8 },
}

impl TimePeriod {
    /// The calendar year of this period.
    pub fn year(&self) -> i32 {
        match self {
            TimePeriod::Year(year) => *year,
            TimePeriod::Month { year, .. } => *year,
        }
    }

    /// Month ordinal used for ordering and age interpolation.
    ///
    /// Annual periods count as month 0 so they sort ahead of any month
    /// of the same year, and so year-to-year ages come out as whole
    /// numbers.
    fn month_ordinal(&self) -> u8 {
        match self {
            TimePeriod::Year(_) => 0,
            TimePeriod::Month { month, .. } => *month,
        }
    }

    fn sort_key(&self) -> (i32, u8) {
        (self.year(), self.month_ordinal())
    }

    /// Age of this period relative to `latest`, in fractional years.
    ///
    /// Months interpolate linearly (one month = 1/12 year). Periods
    /// newer than `latest` clamp to age zero.
    pub fn age_in_years(&self, latest: &TimePeriod) -> f64 {
        let years = f64::from(latest.year() - self.year());
        let months =
            f64::from(i16::from(latest.month_ordinal()) - i16::from(self.month_ordinal()));
        (years + months / 12.0).max(0.0)
    }
}

impl Ord for TimePeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for TimePeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePeriod::Year(year) => write!(f, "{year}"),
            TimePeriod::Month { year, month } => write!(f, "{year}M{month:02}"),
        }
    }
}

impl FromStr for TimePeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParsePeriodError::Empty);
        }
        match s.split_once(['M', 'm']) {
            None => {
                let year = s.parse::<i32>().map_err(|_| ParsePeriodError::InvalidYear {
                    input: s.to_string(),
                })?;
                Ok(TimePeriod::Year(year))
            }
            Some((year_part, month_part)) => {
                let year = year_part
                    .parse::<i32>()
                    .map_err(|_| ParsePeriodError::InvalidYear {
                        input: s.to_string(),
                    })?;
                let month = month_part
                    .parse::<u8>()
                    .map_err(|_| ParsePeriodError::InvalidMonth {
                        input: s.to_string(),
                    })?;
                if !(1..=12).contains(&month) {
                    return Err(ParsePeriodError::InvalidMonth {
                        input: s.to_string(),
                    });
                }
                Ok(TimePeriod::Month { year, month })
            }
        }
    }
}

impl From<TimePeriod> for String {
    fn from(period: TimePeriod) -> Self {
        period.to_string()
    }
}

impl TryFrom<String> for TimePeriod {
    type Error = ParsePeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An optionally-bounded period range used to scope dataset queries.
///
/// `None` on either end means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: Option<TimePeriod>,
    pub to: Option<TimePeriod>,
}

impl TimeRange {
    /// The unbounded range covering every period.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether `period` falls inside this range (bounds inclusive).
    pub fn contains(&self, period: &TimePeriod) -> bool {
        if let Some(from) = &self.from {
            if period < from {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if period > to {
                return false;
            }
        }
        true
    }
}
