use std::iter::FusedIterator;
use std::{fmt, mem};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("range iterator is exhausted")]
pub struct ExhaustedError;

/// A closed interval `[from, to]` over any totally ordered value.
///
/// The bounds are normalized on construction so that `from <= to` always
/// holds, no matter which order they were given in.
///
/// ```
/// use utilrs::time::OrderedRange;
/// let range = OrderedRange::new(10, 2);
/// assert_eq!(&2, range.from());
/// assert_eq!(&10, range.to());
/// assert!(range.contains(&10));
/// assert!(range.is_before(&11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OrderedRange<T> {
    from: T,
    to: T,
}

impl<T: Ord> OrderedRange<T> {
    pub fn new(from: T, to: T) -> Self {
        if from < to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// The lower bound of the range.
    pub fn from(&self) -> &T {
        &self.from
    }

    /// The upper bound of the range.
    pub fn to(&self) -> &T {
        &self.to
    }

    pub fn into_bounds(self) -> (T, T) {
        (self.from, self.to)
    }

    /// Tests if this range ends before `point`.
    pub fn is_before(&self, point: &T) -> bool {
        &self.to < point
    }

    /// Tests if this range starts after `point`.
    pub fn is_after(&self, point: &T) -> bool {
        &self.from > point
    }

    /// Tests if `point` lies within the range, bounds included.
    pub fn contains(&self, point: &T) -> bool {
        !self.is_before(point) && !self.is_after(point)
    }

    /// Tests if this range ends before `other` starts. Touching ranges are
    /// not before each other.
    pub fn is_before_range(&self, other: &Self) -> bool {
        self.to < other.from
    }

    /// Tests if this range starts after `other` ends.
    pub fn is_after_range(&self, other: &Self) -> bool {
        self.from > other.to
    }

    pub fn begins_before(&self, other: &Self) -> bool {
        self.from < other.from
    }

    pub fn ends_after(&self, other: &Self) -> bool {
        self.to > other.to
    }

    /// Tests if either bound of `other` lies within this range.
    ///
    /// This only looks at the bounds of `other`, so a range strictly inside
    /// `other` does not overlap it even though `other` overlaps the range:
    ///
    /// ```
    /// # use utilrs::time::OrderedRange;
    /// let outer = OrderedRange::new(1, 10);
    /// let inner = OrderedRange::new(3, 5);
    /// assert!(outer.overlaps(&inner));
    /// assert!(!inner.overlaps(&outer));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contains(&other.from) || self.contains(&other.to)
    }
}

impl<T: Ord + Clone> OrderedRange<T> {
    /// Iterates the range from `from` up to `to`.
    ///
    /// `step` produces each value from the previous one and iteration stops
    /// once a value is greater than `to`. It is only called when the next
    /// value is requested. A step that never gets past `to` produces an
    /// endless iterator.
    ///
    /// ```
    /// # use utilrs::time::OrderedRange;
    /// let range = OrderedRange::new(1, 7);
    /// let odd: Vec<_> = range.iter_asc(|v| v + 2).collect();
    /// assert_eq!(odd, vec![1, 3, 5, 7]);
    /// ```
    pub fn iter_asc<F>(&self, step: F) -> RangeIter<T, F>
    where
        F: FnMut(&T) -> T,
    {
        RangeIter {
            state: State::Start(self.from.clone()),
            end: self.to.clone(),
            direction: Direction::Ascending,
            step,
        }
    }

    /// Iterates the range from `to` down to `from`.
    ///
    /// Iteration stops once a value produced by `step` is less than `from`.
    pub fn iter_desc<F>(&self, step: F) -> RangeIter<T, F>
    where
        F: FnMut(&T) -> T,
    {
        RangeIter {
            state: State::Start(self.to.clone()),
            end: self.from.clone(),
            direction: Direction::Descending,
            step,
        }
    }
}

impl<T: fmt::Display> fmt::Display for OrderedRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderedRange{{from={}, to={}}}", self.from, self.to)
    }
}

impl<'de, T> Deserialize<'de> for OrderedRange<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Bounds<T> {
            from: T,
            to: T,
        }
        let Bounds { from, to } = Bounds::deserialize(deserializer)?;
        Ok(OrderedRange::new(from, to))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
enum State<T> {
    Start(T),
    Yielded(T),
    Done,
}

/// Iterator returned by [`OrderedRange::iter_asc`] and [`OrderedRange::iter_desc`].
#[derive(Clone)]
pub struct RangeIter<T, F> {
    state: State<T>,
    end: T,
    direction: Direction,
    step: F,
}

impl<T, F> RangeIter<T, F>
where
    T: Ord + Clone,
    F: FnMut(&T) -> T,
{
    fn in_range(&self, value: &T) -> bool {
        match self.direction {
            Direction::Ascending => value <= &self.end,
            Direction::Descending => value >= &self.end,
        }
    }

    /// Advances the iterator, failing with [`ExhaustedError`] once the
    /// bound of the range has been passed.
    ///
    /// `step` runs on the previously returned value, so the first call
    /// never steps.
    pub fn next_value(&mut self) -> Result<T, ExhaustedError> {
        let candidate = match mem::replace(&mut self.state, State::Done) {
            State::Start(first) => first,
            State::Yielded(previous) => (self.step)(&previous),
            State::Done => return Err(ExhaustedError),
        };
        if !self.in_range(&candidate) {
            return Err(ExhaustedError);
        }
        self.state = State::Yielded(candidate.clone());
        Ok(candidate)
    }
}

impl<T, F> Iterator for RangeIter<T, F>
where
    T: Ord + Clone,
    F: FnMut(&T) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value().ok()
    }
}

impl<T, F> FusedIterator for RangeIter<T, F>
where
    T: Ord + Clone,
    F: FnMut(&T) -> T,
{
}

impl<T: fmt::Debug, F> fmt::Debug for RangeIter<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeIter")
            .field("state", &self.state)
            .field("end", &self.end)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

#[cfg(any(test, feature = "test"))]
pub mod proptest {
    use super::*;
    use ::proptest::{arbitrary::Arbitrary, prelude::*};

    impl<T> Arbitrary for OrderedRange<T>
    where
        T: Arbitrary + Ord + 'static,
        <T as Arbitrary>::Strategy: 'static,
    {
        type Parameters = ();
        type Strategy = BoxedStrategy<OrderedRange<T>>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            any::<(T, T)>()
                .prop_map(|(from, to)| OrderedRange::new(from, to))
                .boxed()
        }
    }

    /// Ranges whose bounds are both drawn from `bound`.
    pub fn arb_ordered_range<S>(bound: S) -> impl Strategy<Value = OrderedRange<S::Value>>
    where
        S: Strategy + Clone,
        S::Value: Ord,
    {
        (bound.clone(), bound).prop_map(|(from, to)| OrderedRange::new(from, to))
    }
}
