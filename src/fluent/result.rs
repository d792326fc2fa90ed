//! Verifications for `Result` subjects.

use std::fmt::Debug;

use crate::report::AssertionResult;

use super::builder::Expectation;

impl<T: Debug, E: Debug> Expectation<Result<T, E>> {
    /// Assert the subject is `Ok`.
    pub fn to_be_ok(self) -> Self {
        let result = match &self.subject {
            Ok(_) => AssertionResult::pass("result to be ok"),
            Err(e) => AssertionResult::fail("result to be ok", format!("was err: {:?}", e)),
        };
        self.verify(result)
    }

    /// Assert the subject is `Err`.
    pub fn to_be_err(self) -> Self {
        let result = match &self.subject {
            Ok(v) => AssertionResult::fail("result to be err", format!("was ok: {:?}", v)),
            Err(_) => AssertionResult::pass("result to be err"),
        };
        self.verify(result)
    }

    /// Navigate into the success value, failing if the subject is `Err`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect("42".parse::<i32>()).ok().to_equal(42);
    /// ```
    pub fn ok(self) -> Expectation<T> {
        match self.subject {
            Ok(inner) => Expectation {
                subject: inner,
                report: self.report.child(),
                comparison: crate::compare::Comparison::Natural,
            },
            Err(e) => {
                let result =
                    AssertionResult::fail("result to be ok", format!("was err: {:?}", e));
                self.report
                    .raise(&result, &format!("  subject: Err({:?})\n", e))
            }
        }
    }

    /// Navigate into the error value, failing if the subject is `Ok`.
    pub fn err(self) -> Expectation<E> {
        match self.subject {
            Err(inner) => Expectation {
                subject: inner,
                report: self.report.child(),
                comparison: crate::compare::Comparison::Natural,
            },
            Ok(v) => {
                let result =
                    AssertionResult::fail("result to be err", format!("was ok: {:?}", v));
                self.report
                    .raise(&result, &format!("  subject: Ok({:?})\n", v))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fluent::builder::expect;

    #[test]
    fn test_ok_and_err() {
        expect("42".parse::<i32>()).to_be_ok();
        expect("nope".parse::<i32>()).to_be_err();
    }

    #[test]
    fn test_ok_navigation() {
        expect("42".parse::<i32>()).ok().to_equal(42);
    }

    #[test]
    fn test_err_navigation() {
        expect("nope".parse::<i32>()).err().to_satisfy(|e| {
            e.to_string().contains("invalid digit")
        });
    }

    #[test]
    #[should_panic(expected = "expected result to be ok")]
    fn test_ok_navigation_fails_on_err() {
        expect("nope".parse::<i32>()).ok();
    }
}
