mod calendar_day_range;
mod month_day;
mod ordered_range;

pub use calendar_day_range::CalendarDayRange;
pub use month_day::{MonthDay, MonthDayError, ParseMonthDayError};
pub use ordered_range::{ExhaustedError, OrderedRange, RangeIter};

#[cfg(any(test, feature = "test"))]
pub mod proptest {
    pub use super::month_day::proptest::*;
    pub use super::ordered_range::proptest::*;
}
