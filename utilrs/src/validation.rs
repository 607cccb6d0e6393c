use std::fmt;

use thiserror::Error;
use tracing::debug;

const PREFIX: &str = "Internal Error:";

#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Collects validation problems while a value is being built and reports
/// them all at once.
///
/// Messages are appended verbatim after an `Internal Error:` prefix, so
/// callers supply their own separators.
///
/// ```
/// use std::fmt::Write as _;
/// use utilrs::validation::Validation;
///
/// let mut errors = Validation::new();
/// assert!(errors.check().is_ok());
/// write!(errors, " name is empty;").unwrap();
/// errors.ensure(3 > 4, "three is not greater than four");
/// assert_eq!(
///     errors.check().unwrap_err().to_string(),
///     "Internal Error: name is empty; three is not greater than four"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    errors: String,
}

impl Validation {
    pub fn new() -> Self {
        Validation {
            errors: PREFIX.to_string(),
        }
    }

    /// Appends `message` as is.
    pub fn push(&mut self, message: &str) -> &mut Self {
        self.errors.push_str(message);
        self
    }

    /// Appends `message`, preceded by a space, unless `condition` holds.
    pub fn ensure(&mut self, condition: bool, message: impl fmt::Display) -> &mut Self {
        if !condition {
            self.errors.push(' ');
            self.errors.push_str(&message.to_string());
        }
        self
    }

    pub fn message(&self) -> &str {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors == PREFIX
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            debug!(errors = %self.errors, "Validation failed");
            Err(ValidationError(self.errors.clone()))
        }
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for Validation {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.errors.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod unittests {
    use std::fmt::Write as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn validates() {
        let mut validation = Validation::new();
        assert_eq!(validation.message(), "Internal Error:");
        assert!(validation.is_valid());
        assert_eq!(validation.check(), Ok(()));

        validation.push(" this is a test");
        assert!(!validation.is_valid());
        let err = validation.check().expect_err("validation should fail");
        assert_eq!(err.message(), "Internal Error: this is a test");
        assert_eq!(err.to_string(), "Internal Error: this is a test");
    }

    #[test_log::test]
    fn ensure_only_appends_failures() {
        let mut validation = Validation::default();
        validation
            .ensure(true, "not shown")
            .ensure(false, format_args!("field {} is missing", "name"))
            .ensure(false, 42);
        assert_eq!(
            validation.check(),
            Err(ValidationError("Internal Error: field name is missing 42".into()))
        );
    }

    #[test_log::test]
    fn write_appends() {
        let mut validation = Validation::new();
        write!(validation, " expected {} got {}", 1, 2).unwrap();
        assert_eq!(validation.message(), "Internal Error: expected 1 got 2");
    }
}
