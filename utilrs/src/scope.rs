//! Run code while holding a resource that has to be acquired first and
//! released afterwards.
//!
//! ```
//! use std::cell::Cell;
//! use utilrs::scope::Scope;
//!
//! let scope = Scope::new(
//!     Cell::new(0u32),
//!     |users| users.get() < 2,
//!     |_| println!("released"),
//! );
//! assert!(scope.run(|users| users.set(users.get() + 1)));
//! assert_eq!(scope.supply(|users| users.get()), Some(1));
//! ```
use std::fmt;

use tracing::{debug, trace};

/// A resource paired with the callbacks that acquire and release it.
///
/// `enter` reports whether the resource could be acquired. `exit` is only
/// called for a successful `enter` and is called even when the code run in
/// between panics.
pub struct Scope<T, E, X> {
    resource: T,
    enter: E,
    exit: X,
}

impl<T, E, X> Scope<T, E, X>
where
    E: Fn(&T) -> bool,
    X: Fn(&T),
{
    pub fn new(resource: T, enter: E, exit: X) -> Self {
        Self {
            resource,
            enter,
            exit,
        }
    }

    pub fn resource(&self) -> &T {
        &self.resource
    }

    pub fn into_resource(self) -> T {
        self.resource
    }

    /// Acquires the resource, runs `block` with it and releases it again.
    ///
    /// Returns `false` without running `block` when the resource could not
    /// be acquired.
    pub fn run<F>(&self, block: F) -> bool
    where
        F: FnOnce(&T),
    {
        self.supply(block).is_some()
    }

    /// Same as [`Scope::run`] but returns the result of `block`, or `None`
    /// when the resource could not be acquired.
    pub fn supply<R, F>(&self, block: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.guard();
        if !guard.acquired() {
            return None;
        }
        Some(block(guard.resource()))
    }

    /// Tries to acquire the resource and returns a guard that releases it
    /// when closed or dropped.
    ///
    /// Check [`ScopeGuard::acquired`] before using the resource.
    ///
    /// ```
    /// # use utilrs::scope::Scope;
    /// let scope = Scope::new("db", |_| true, |name| println!("closing {name}"));
    /// {
    ///     let guard = scope.guard();
    ///     if guard.acquired() {
    ///         assert_eq!(*guard.resource(), "db");
    ///     }
    /// }
    /// ```
    pub fn guard(&self) -> ScopeGuard<'_, T, X> {
        let acquired = (self.enter)(&self.resource);
        if acquired {
            trace!("Scope resource acquired");
        } else {
            debug!("Scope resource could not be acquired");
        }
        ScopeGuard {
            resource: &self.resource,
            exit: &self.exit,
            acquired,
            closed: false,
        }
    }
}

impl<T: fmt::Debug, E, X> fmt::Debug for Scope<T, E, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

/// Creates a scope whose resource can always be acquired.
///
/// `acquire` is still called on every entry, its outcome just can't fail.
pub fn always_acquires<T, A, X>(
    resource: T,
    acquire: A,
    exit: X,
) -> Scope<T, impl Fn(&T) -> bool, X>
where
    A: Fn(&T),
    X: Fn(&T),
{
    Scope::new(
        resource,
        move |r: &T| {
            acquire(r);
            true
        },
        exit,
    )
}

/// Holds an acquisition made by [`Scope::guard`].
#[must_use = "dropping the guard releases the resource right away"]
pub struct ScopeGuard<'s, T, X>
where
    X: Fn(&T),
{
    resource: &'s T,
    exit: &'s X,
    acquired: bool,
    closed: bool,
}

impl<'s, T, X> ScopeGuard<'s, T, X>
where
    X: Fn(&T),
{
    pub fn resource(&self) -> &'s T {
        self.resource
    }

    pub fn acquired(&self) -> bool {
        self.acquired
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Releases the resource. Does nothing when it was never acquired or
    /// has already been released.
    pub fn close(&mut self) {
        if self.acquired && !self.closed {
            self.closed = true;
            (self.exit)(self.resource);
            trace!("Scope resource released");
        }
    }
}

impl<T, X> Drop for ScopeGuard<'_, T, X>
where
    X: Fn(&T),
{
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: fmt::Debug, X> fmt::Debug for ScopeGuard<'_, T, X>
where
    X: Fn(&T),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("resource", &self.resource)
            .field("acquired", &self.acquired)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

struct Release<R: FnOnce()>(Option<R>);

impl<R: FnOnce()> Drop for Release<R> {
    fn drop(&mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

/// Runs `body` between `acquire` and `release` without a resource value.
///
/// Returns `false` and skips both `body` and `release` when `acquire`
/// fails. Once acquired, `release` runs even if `body` panics.
///
/// ```
/// # use utilrs::scope::scoped;
/// let mut log = Vec::new();
/// let log = std::cell::RefCell::new(&mut log);
/// let ran = scoped(
///     || { log.borrow_mut().push("acquire"); true },
///     || log.borrow_mut().push("body"),
///     || log.borrow_mut().push("release"),
/// );
/// assert!(ran);
/// assert_eq!(**log.borrow(), ["acquire", "body", "release"]);
/// ```
pub fn scoped<A, B, R>(acquire: A, body: B, release: R) -> bool
where
    A: FnOnce() -> bool,
    B: FnOnce(),
    R: FnOnce(),
{
    if !acquire() {
        debug!("Scope could not be acquired");
        return false;
    }
    let _release = Release(Some(release));
    body();
    true
}

#[cfg(test)]
mod unittests {
    use std::cell::{Cell, RefCell};
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: RefCell<Vec<&'static str>>,
    }

    impl Recorder {
        fn record(&self, call: &'static str) {
            self.calls.borrow_mut().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    fn recording_scope(
        acquires: bool,
    ) -> Scope<Recorder, impl Fn(&Recorder) -> bool, impl Fn(&Recorder)> {
        Scope::new(
            Recorder::default(),
            move |r: &Recorder| {
                r.record("enter");
                acquires
            },
            |r: &Recorder| r.record("exit"),
        )
    }

    #[test_log::test]
    fn always_acquires_calls_acquire() {
        let scope = always_acquires(
            Recorder::default(),
            |r: &Recorder| r.record("acquire"),
            |r: &Recorder| r.record("exit"),
        );
        assert!(scope.run(|r| r.record("block")));
        assert_eq!(scope.resource().calls(), vec!["acquire", "block", "exit"]);
    }

    #[test_log::test]
    fn run() {
        let scope = recording_scope(true);
        assert!(scope.run(|r| r.record("block")));
        assert_eq!(scope.resource().calls(), vec!["enter", "block", "exit"]);
    }

    #[test_log::test]
    fn into_resource_keeps_state() {
        let scope = recording_scope(true);
        assert!(scope.run(|r| r.record("block")));
        assert_eq!(scope.into_resource().calls(), vec!["enter", "block", "exit"]);
    }

    #[test_log::test]
    fn does_not_run_when_enter_fails() {
        let scope = recording_scope(false);
        assert!(!scope.run(|r| r.record("block")));
        assert_eq!(scope.resource().calls(), vec!["enter"]);
    }

    #[test_log::test]
    fn supply() {
        let scope = recording_scope(true);
        let value = scope.supply(|r| {
            r.record("block");
            42
        });
        assert_eq!(value, Some(42));
        assert_eq!(scope.resource().calls(), vec!["enter", "block", "exit"]);
    }

    #[test_log::test]
    fn supply_returns_none_when_enter_fails() {
        let scope = recording_scope(false);
        let value = scope.supply(|r| {
            r.record("block");
            42
        });
        assert_eq!(value, None);
        assert_eq!(scope.resource().calls(), vec!["enter"]);
    }

    #[test_log::test]
    fn exit_runs_when_block_panics() {
        let scope = recording_scope(true);
        let res = catch_unwind(AssertUnwindSafe(|| {
            scope.run(|r| {
                r.record("block");
                panic!("block failed");
            })
        }));
        assert!(res.is_err());
        assert_eq!(scope.resource().calls(), vec!["enter", "block", "exit"]);
    }

    #[test_log::test]
    fn guard() {
        let scope = recording_scope(true);
        {
            let guard = scope.guard();
            assert!(guard.acquired());
            assert!(!guard.is_closed());
            assert_eq!(guard.resource().calls(), vec!["enter"]);
        }
        assert_eq!(scope.resource().calls(), vec!["enter", "exit"]);
    }

    #[test_log::test]
    fn guard_not_acquired_does_not_exit() {
        let scope = recording_scope(false);
        {
            let guard = scope.guard();
            assert!(!guard.acquired());
            assert_eq!(guard.resource().calls(), vec!["enter"]);
        }
        assert_eq!(scope.resource().calls(), vec!["enter"]);
    }

    #[test_log::test]
    fn guard_closes_once() {
        let scope = recording_scope(true);
        {
            let mut guard = scope.guard();
            guard.close();
            assert!(guard.is_closed());
            guard.close();
        }
        assert_eq!(scope.resource().calls(), vec!["enter", "exit"]);
    }

    #[test_log::test]
    fn guard_not_acquired_never_closes() {
        let scope = recording_scope(false);
        let mut guard = scope.guard();
        guard.close();
        assert!(!guard.is_closed());
        drop(guard);
        assert_eq!(scope.resource().calls(), vec!["enter"]);
    }

    #[test_log::test]
    fn scoped_runs_in_order() {
        let rec = Recorder::default();
        let ran = scoped(
            || {
                rec.record("acquire");
                true
            },
            || rec.record("body"),
            || rec.record("release"),
        );
        assert!(ran);
        assert_eq!(rec.calls(), vec!["acquire", "body", "release"]);
    }

    #[test_log::test]
    fn scoped_skips_body_and_release() {
        let released = Cell::new(false);
        let ran = scoped(|| false, || panic!("body must not run"), || released.set(true));
        assert!(!ran);
        assert!(!released.get());
    }

    #[test_log::test]
    fn scoped_releases_on_panic() {
        let released = Cell::new(false);
        let res = catch_unwind(AssertUnwindSafe(|| {
            scoped(|| true, || panic!("body failed"), || released.set(true))
        }));
        assert!(res.is_err());
        assert!(released.get());
    }
}
