use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::MonthDay;

/// A closed range of days of the year.
///
/// The bounds are kept exactly as given. When `from` comes after `to` the
/// range wraps around the end of the year, so `--11-01` to `--02-01` covers
/// November through January.
///
/// ```
/// use utilrs::time::{CalendarDayRange, MonthDay};
/// let winter = CalendarDayRange::new(
///     MonthDay::new(12, 1).unwrap(),
///     MonthDay::new(1, 31).unwrap(),
/// );
/// assert!(winter.wraps());
/// assert!(winter.contains(MonthDay::new(1, 1).unwrap()));
/// assert!(!winter.contains(MonthDay::new(3, 23).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("CalendarDayRange{{from={from}, to={to}}}")]
pub struct CalendarDayRange {
    from: MonthDay,
    to: MonthDay,
}

impl CalendarDayRange {
    pub const fn new(from: MonthDay, to: MonthDay) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> MonthDay {
        self.from
    }

    pub fn to(&self) -> MonthDay {
        self.to
    }

    /// Whether the range crosses from December into January.
    pub fn wraps(&self) -> bool {
        self.from > self.to
    }

    pub fn contains(&self, day: MonthDay) -> bool {
        if self.wraps() {
            (day >= self.from && day <= MonthDay::MAX)
                || (day >= MonthDay::MIN && day <= self.to)
        } else {
            day >= self.from && day <= self.to
        }
    }

    /// Tests if either bound of `other` falls within this range.
    ///
    /// Like [`OrderedRange::overlaps`](super::OrderedRange::overlaps) this
    /// only checks the bounds of `other`, so it is not symmetric.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contains(other.from) || self.contains(other.to)
    }

    /// Tests if the day of year of `date` falls within this range.
    #[cfg(feature = "chrono")]
    pub fn contains_date(&self, date: &chrono::NaiveDate) -> bool {
        self.contains(MonthDay::from(*date))
    }
}

#[cfg(any(test, feature = "test"))]
pub mod proptest {
    use super::*;
    use ::proptest::{arbitrary::Arbitrary, prelude::*};

    impl Arbitrary for CalendarDayRange {
        type Parameters = ();
        type Strategy = BoxedStrategy<CalendarDayRange>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            any::<(MonthDay, MonthDay)>()
                .prop_map(|(from, to)| CalendarDayRange::new(from, to))
                .boxed()
        }
    }
}
