//! Reporting period representation
//!
//! A period is either the "all" sentinel, a calendar month ("2024-03") or a
//! calendar year ("2024"). Matching is by calendar fields only; day of month
//! never matters.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel accepted by [`Period::parse`] for "no filtering"
pub const ALL_PERIODS: &str = "all";

/// Represents a reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// Every record, unfiltered
    #[default]
    All,

    /// Monthly period (e.g., "2024-03")
    Month { year: i32, month: u32 },

    /// Yearly period (e.g., "2024")
    Year { year: i32 },
}

impl Period {
    /// Create a monthly period
    pub fn month(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    /// Create a yearly period
    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// The monthly period containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Get the current monthly period
    pub fn current_month() -> Self {
        Self::month_of(chrono::Local::now().date_naive())
    }

    /// Check if this is the "all" sentinel
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
            Self::Year { year } => date.year() == *year,
        }
    }

    /// Get the first day of this period; `None` for [`Period::All`]
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 1, 1),
        }
    }

    /// Get the last day of this period (inclusive); `None` for [`Period::All`]
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Month { .. } => {
                let next = self.next().start_date()?;
                Some(next - Duration::days(1))
            }
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 12, 31),
        }
    }

    /// Get the next period; `All` has no neighbours and returns itself
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Month { year, month } => {
                if *month == 12 {
                    Self::Month {
                        year: *year + 1,
                        month: 1,
                    }
                } else {
                    Self::Month {
                        year: *year,
                        month: *month + 1,
                    }
                }
            }
            Self::Year { year } => Self::Year { year: *year + 1 },
        }
    }

    /// Get the previous period; `All` has no neighbours and returns itself
    pub fn prev(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Month { year, month } => {
                if *month == 1 {
                    Self::Month {
                        year: *year - 1,
                        month: 12,
                    }
                } else {
                    Self::Month {
                        year: *year,
                        month: *month - 1,
                    }
                }
            }
            Self::Year { year } => Self::Year { year: *year - 1 },
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - All: "all"
    /// - Monthly: "2024-03"
    /// - Yearly: "2024"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if s.eq_ignore_ascii_case(ALL_PERIODS) {
            return Ok(Self::All);
        }

        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [year] => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                Ok(Self::Year { year })
            }
            [year, month] => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                let month: u32 = month
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

                if !(1..=12).contains(&month) {
                    return Err(PeriodParseError::InvalidMonth(month));
                }

                Ok(Self::Month { year, month })
            }
            _ => Err(PeriodParseError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL_PERIODS),
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Last day of the month before the one containing `today`
///
/// Goals ending on or before this date are considered expired.
pub fn end_of_previous_month(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today) - Duration::days(1)
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
