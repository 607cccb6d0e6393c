/// Calls each supplier in turn and returns the first value one of them
/// produces. Suppliers after that are never called.
///
/// ```
/// use utilrs::optional::first_of;
/// let cached: Option<&str> = None;
/// let found = first_of([
///     Box::new(move || cached) as Box<dyn FnOnce() -> Option<&'static str>>,
///     Box::new(|| Some("computed")),
///     Box::new(|| Some("fallback")),
/// ]);
/// assert_eq!(found, Some("computed"));
/// ```
pub fn first_of<T, I, F>(suppliers: I) -> Option<T>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Option<T>,
{
    suppliers.into_iter().find_map(|supplier| supplier())
}

/// Macro form of [`first_of`](crate::optional::first_of) that accepts
/// suppliers of different types.
///
/// ```
/// use utilrs::first_of;
/// fn from_env() -> Option<u16> { None }
/// let port = first_of!(from_env, || "8080".parse().ok(), || Some(80));
/// assert_eq!(port, Some(8080));
/// ```
#[macro_export]
macro_rules! first_of {
    ($($supplier:expr),+ $(,)?) => {{
        ::core::option::Option::None$(.or_else(|| ($supplier)()))+
    }};
}
