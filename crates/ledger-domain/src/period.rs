//! Calendar-month identity used to group sales.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::common::Displayable;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A `(year, month)` pair with `month` in `1..=12`.
///
/// The derived ordering compares the year first and breaks ties on the month, which is the
/// chronological order. Display order (most recent first) is the reverse of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriodKey")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

/// Unchecked wire form; deserialization goes through [`PeriodKey::new`].
#[derive(Deserialize)]
struct RawPeriodKey {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriodKey> for PeriodKey {
    type Error = PeriodParseError;

    fn try_from(raw: RawPeriodKey) -> Result<Self, Self::Error> {
        PeriodKey::new(raw.year, raw.month).ok_or(PeriodParseError::MonthOutOfRange(raw.month))
    }
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Returns the period containing `moment`, evaluated in the moment's own time zone.
    pub fn containing<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self {
        Self {
            year: moment.year(),
            month: moment.month(),
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Returns `true` when `self` falls strictly after `other`.
    pub fn is_after(&self, other: &PeriodKey) -> bool {
        self > other
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Displayable for PeriodKey {
    fn display_label(&self) -> String {
        format!("{}, {}", self.month_name(), self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    Format(String),
    MonthOutOfRange(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::Format(raw) => {
                write!(f, "`{raw}` is not a period, expected YYYY-MM")
            }
            PeriodParseError::MonthOutOfRange(month) => {
                write!(f, "month {month} is outside 1-12")
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

impl FromStr for PeriodKey {
    type Err = PeriodParseError;

    /// Parses `YYYY-MM` (the month may omit its leading zero).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let format_err = || PeriodParseError::Format(trimmed.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(format_err)?;
        let year: i32 = year.parse().map_err(|_| format_err())?;
        let month: u32 = month.parse().map_err(|_| format_err())?;
        PeriodKey::new(year, month).ok_or(PeriodParseError::MonthOutOfRange(month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn rejects_month_outside_calendar() {
        assert!(PeriodKey::new(2024, 0).is_none());
        assert!(PeriodKey::new(2024, 13).is_none());
    }

    #[test]
    fn orders_by_year_then_month() {
        let dec_2023 = PeriodKey::new(2023, 12).unwrap();
        let jan_2024 = PeriodKey::new(2024, 1).unwrap();
        let mar_2024 = PeriodKey::new(2024, 3).unwrap();
        assert!(jan_2024.is_after(&dec_2023));
        assert!(mar_2024 > jan_2024);
        assert!(!dec_2023.is_after(&dec_2023));
    }

    #[test]
    fn containing_respects_time_zone() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 31, 22, 30, 0).unwrap();
        assert_eq!(PeriodKey::containing(&utc), PeriodKey::new(2024, 3).unwrap());

        let ahead = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let local = utc.with_timezone(&ahead);
        assert_eq!(PeriodKey::containing(&local), PeriodKey::new(2024, 4).unwrap());
    }

    #[test]
    fn labels_and_parsing() {
        let key: PeriodKey = "2024-3".parse().unwrap();
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key.display_label(), "March, 2024");
        assert_eq!(
            "2024-13".parse::<PeriodKey>(),
            Err(PeriodParseError::MonthOutOfRange(13))
        );
        assert!(matches!(
            "march".parse::<PeriodKey>(),
            Err(PeriodParseError::Format(_))
        ));
    }

    #[test]
    fn deserialization_checks_the_month() {
        let key: PeriodKey = serde_json::from_str(r#"{"year": 2024, "month": 3}"#).unwrap();
        assert_eq!(key, PeriodKey::new(2024, 3).unwrap());
        assert_eq!(serde_json::to_string(&key).unwrap(), r#"{"year":2024,"month":3}"#);

        for month in [0, 13] {
            let raw = format!(r#"{{"year": 2024, "month": {month}}}"#);
            let err = serde_json::from_str::<PeriodKey>(&raw).unwrap_err();
            assert!(err.to_string().contains("outside 1-12"), "{err}");
        }
    }
}
