use std::str::FromStr;

use derive_more::Display;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// Longest length of each month. February counts its leap day since a
/// month-day has no year to rule it out.
const MONTH_LENGTHS: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MonthDayError {
    #[error("invalid month {0}")]
    InvalidMonth(u8),
    #[error("invalid day {day} for month {month}")]
    InvalidDay { month: u8, day: u8 },
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseMonthDayError {
    #[error("month-day {0:?} is not in --MM-DD form")]
    Format(String),
    #[error("month-day error {0}")]
    MonthDay(
        #[from]
        #[source]
        MonthDayError,
    ),
}

/// A day of the year without a year: a month and a day-of-month.
///
/// Ordering is by month first and then by day-of-month. The text form is the
/// ISO-8601 `--MM-DD` notation.
///
/// ```
/// use utilrs::time::MonthDay;
/// let christmas = MonthDay::new(12, 25).unwrap();
/// assert_eq!("--12-25", christmas.to_string());
/// assert_eq!(christmas, "--12-25".parse().unwrap());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[display("--{month:02}-{day:02}")]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    /// January 1st, the first day of every year.
    pub const MIN: MonthDay = MonthDay { month: 1, day: 1 };
    /// December 31st, the last day of every year.
    pub const MAX: MonthDay = MonthDay { month: 12, day: 31 };

    pub fn new(month: u8, day: u8) -> Result<MonthDay, MonthDayError> {
        let max_day = Self::max_length(month)?;
        if day == 0 || day > max_day {
            return Err(MonthDayError::InvalidDay { month, day });
        }
        Ok(MonthDay { month, day })
    }

    /// The maximum number of days `month` can have.
    pub fn max_length(month: u8) -> Result<u8, MonthDayError> {
        if !(1..=12).contains(&month) {
            return Err(MonthDayError::InvalidMonth(month));
        }
        Ok(MONTH_LENGTHS[month as usize - 1])
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

fn parse_two_digits(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (ones - b'0')),
        _ => None,
    }
}

impl FromStr for MonthDay {
    type Err = ParseMonthDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ParseMonthDayError::Format(s.into());
        let rest = s.strip_prefix("--").ok_or_else(format_err)?;
        let (month_s, day_s) = rest.split_once('-').ok_or_else(format_err)?;
        let month = parse_two_digits(month_s).ok_or_else(format_err)?;
        let day = parse_two_digits(day_s).ok_or_else(format_err)?;
        Ok(MonthDay::new(month, day)?)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for MonthDay {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike as _;
        MonthDay {
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod proptest {
    use super::*;
    use ::proptest::{arbitrary::Arbitrary, prelude::*};

    impl Arbitrary for MonthDay {
        type Parameters = ();
        type Strategy = BoxedStrategy<MonthDay>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            arb_month_day().boxed()
        }
    }

    prop_compose! {
        pub fn arb_month_day()
        (month in 1u8..=12)
        (
            month in Just(month),
            day in 1u8..=MONTH_LENGTHS[month as usize - 1],
        ) -> MonthDay
        {
            MonthDay { month, day }
        }
    }
}
