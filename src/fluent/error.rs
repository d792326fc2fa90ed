//! Verifications for error values and panicking closures.
//!
//! Error subjects go through the regular `expect` entry and get message and
//! source-chain checks. Panics are captured by `expect_panic`, which runs a
//! closure under `catch_unwind` and wraps the payload's message.

use std::fmt::Debug;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::report::{AssertionResult, Report};

use super::builder::Expectation;

impl<E: std::error::Error + Debug> Expectation<E> {
    /// Assert the error's display rendering equals the given text.
    pub fn to_have_message(self, message: &str) -> Self {
        let actual = self.subject.to_string();
        let result = if actual == message {
            AssertionResult::pass(format!("error to have message {:?}", message))
        } else {
            AssertionResult::fail(
                format!("error to have message {:?}", message),
                format!("message was {:?}", actual),
            )
        };
        self.verify(result)
    }

    /// Assert the error's display rendering contains the given text.
    pub fn to_have_message_containing(self, part: &str) -> Self {
        let actual = self.subject.to_string();
        let result = if actual.contains(part) {
            AssertionResult::pass(format!("error message to contain {:?}", part))
        } else {
            AssertionResult::fail(
                format!("error message to contain {:?}", part),
                format!("message was {:?}", actual),
            )
        };
        self.verify(result)
    }

    /// Assert the error has an underlying source.
    pub fn to_have_source(self) -> Self {
        let result = if self.subject.source().is_some() {
            AssertionResult::pass("error to have a source")
        } else {
            AssertionResult::fail("error to have a source", "it had none".to_string())
        };
        self.verify(result)
    }

    /// Assert the error has no underlying source.
    pub fn to_have_no_source(self) -> Self {
        let result = match self.subject.source() {
            Some(source) => AssertionResult::fail(
                "error to have no source",
                format!("source was {:?}", source.to_string()),
            ),
            None => AssertionResult::pass("error to have no source"),
        };
        self.verify(result)
    }

    /// Navigate to the source error's message, failing if there is none.
    pub fn source_message(self) -> Expectation<String> {
        match self.subject.source() {
            Some(source) => Expectation {
                subject: source.to_string(),
                report: self.report.child(),
                comparison: crate::compare::Comparison::Natural,
            },
            None => {
                let result =
                    AssertionResult::fail("error to have a source", "it had none".to_string());
                let subject_line = format!("  subject: {:?}\n", self.subject);
                self.report.raise(&result, &subject_line)
            }
        }
    }
}

/// Expectation over the message of a captured panic, built by
/// [`expect_panic`].
#[derive(Debug)]
pub struct PanicExpectation {
    message: String,
    report: Report,
}

/// Run a closure and capture the panic it raises.
///
/// Fails immediately if the closure returns normally. The captured panic
/// message is available for further assertions.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::expect_panic;
///
/// expect_panic(|| divide(1, 0)).to_have_message_containing("divide by zero");
/// ```
#[track_caller]
pub fn expect_panic<F: FnOnce()>(f: F) -> PanicExpectation {
    let report = Report::here();
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => {
            let result = AssertionResult::fail(
                "closure to panic",
                "it returned normally".to_string(),
            );
            report.raise(&result, "")
        }
        Err(payload) => {
            let message = if let Some(text) = payload.downcast_ref::<String>() {
                text.clone()
            } else if let Some(text) = payload.downcast_ref::<&'static str>() {
                (*text).to_string()
            } else {
                "<non-string panic payload>".to_string()
            };
            PanicExpectation { message, report }
        }
    }
}

impl PanicExpectation {
    /// Attach a description that prefixes any failure message.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.report.description = Some(description.into());
        self
    }

    /// Assert the panic message equals the given text.
    pub fn to_have_message(self, message: &str) -> Self {
        let result = if self.message == message {
            AssertionResult::pass(format!("panic to have message {:?}", message))
        } else {
            AssertionResult::fail(
                format!("panic to have message {:?}", message),
                format!("message was {:?}", self.message),
            )
        };
        self.verify(result)
    }

    /// Assert the panic message contains the given text.
    pub fn to_have_message_containing(self, part: &str) -> Self {
        let result = if self.message.contains(part) {
            AssertionResult::pass(format!("panic message to contain {:?}", part))
        } else {
            AssertionResult::fail(
                format!("panic message to contain {:?}", part),
                format!("message was {:?}", self.message),
            )
        };
        self.verify(result)
    }

    /// The captured panic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn verify(self, result: AssertionResult) -> Self {
        if result.passed {
            return self;
        }
        let subject_line = format!("  panic message: {:?}\n", self.message);
        self.report.raise(&result, &subject_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::builder::expect;
    use crate::fluent::str::StrExpectations;

    #[derive(Debug, thiserror::Error)]
    enum StoreError {
        #[error("record {0} not found")]
        NotFound(u64),

        #[error("store unavailable")]
        Unavailable(#[source] std::io::Error),
    }

    #[test]
    fn test_error_message_checks() {
        expect(StoreError::NotFound(7))
            .to_have_message("record 7 not found")
            .to_have_message_containing("not found")
            .to_have_no_source();
    }

    #[test]
    fn test_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        expect(StoreError::Unavailable(inner))
            .to_have_source()
            .source_message()
            .to_contain("disk on fire");
    }

    #[test]
    #[should_panic(expected = "expected error message to contain")]
    fn test_message_mismatch_fails() {
        expect(StoreError::NotFound(7)).to_have_message_containing("timeout");
    }

    #[test]
    fn test_expect_panic_captures_message() {
        expect_panic(|| panic!("boom: {}", 42))
            .to_have_message("boom: 42")
            .to_have_message_containing("boom");
    }

    #[test]
    fn test_expect_panic_captures_static_str() {
        expect_panic(|| panic!("plain boom")).to_have_message_containing("plain");
    }

    #[test]
    #[should_panic(expected = "expected closure to panic")]
    fn test_expect_panic_fails_on_normal_return() {
        expect_panic(|| {});
    }
}
