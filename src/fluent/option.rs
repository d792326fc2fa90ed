//! Verifications for `Option` subjects.

use std::fmt::Debug;

use crate::report::AssertionResult;

use super::builder::Expectation;

impl<T: Debug> Expectation<Option<T>> {
    /// Assert the subject is `Some`.
    pub fn to_be_some(self) -> Self {
        let result = if self.subject.is_some() {
            AssertionResult::pass("option to be some")
        } else {
            AssertionResult::fail("option to be some", "was none".to_string())
        };
        self.verify(result)
    }

    /// Assert the subject is `None`.
    pub fn to_be_none(self) -> Self {
        let result = match &self.subject {
            Some(inner) => AssertionResult::fail(
                "option to be none",
                format!("contained {:?}", inner),
            ),
            None => AssertionResult::pass("option to be none"),
        };
        self.verify(result)
    }

    /// Assert the subject is `Some` and contains the given value.
    pub fn to_contain(self, expected: T) -> Self
    where
        T: PartialEq,
    {
        let result = match &self.subject {
            Some(inner) if *inner == expected => {
                AssertionResult::pass(format!("option to contain {:?}", expected))
            }
            Some(inner) => AssertionResult::fail(
                format!("option to contain {:?}", expected),
                format!("contained {:?}", inner),
            ),
            None => AssertionResult::fail(
                format!("option to contain {:?}", expected),
                "was none".to_string(),
            ),
        };
        self.verify(result)
    }

    /// Navigate into the contained value, failing if the subject is `None`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect(lookup("frodo")).some().to_equal(9);
    /// ```
    pub fn some(self) -> Expectation<T> {
        match self.subject {
            Some(inner) => Expectation {
                subject: inner,
                report: self.report.child(),
                comparison: crate::compare::Comparison::Natural,
            },
            None => {
                let result = AssertionResult::fail("option to be some", "was none".to_string());
                self.report.raise(&result, "  subject: None\n")
            }
        }
    }
}
