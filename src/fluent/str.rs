//! String verifications.
//!
//! Implemented as an extension trait over any `AsRef<str>` subject, so the
//! same chain works for `&str`, `String` and string-like newtypes. Pattern
//! checks come in three flavors, mirroring the matcher stack used across
//! the crate: substring, regex and glob.

use std::fmt::Debug;

use glob::Pattern;
use regex::Regex;

use crate::report::{self, AssertionResult};

use super::builder::Expectation;

/// String verifications for `AsRef<str>` subjects.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{expect, StrExpectations};
///
/// expect("The Fellowship of the Ring")
///     .to_start_with("The")
///     .to_contain("Fellowship")
///     .to_match(r"of the \w+$");
/// ```
pub trait StrExpectations: Sized {
    /// Assert the subject contains the given substring.
    fn to_contain(self, part: &str) -> Self;
    /// Assert the subject does not contain the given substring.
    fn to_not_contain(self, part: &str) -> Self;
    /// Assert the subject starts with the given prefix.
    fn to_start_with(self, prefix: &str) -> Self;
    /// Assert the subject ends with the given suffix.
    fn to_end_with(self, suffix: &str) -> Self;
    /// Assert the subject is the empty string.
    fn to_be_empty(self) -> Self;
    /// Assert the subject is not the empty string.
    fn to_not_be_empty(self) -> Self;
    /// Assert the subject has exactly `length` characters.
    fn to_have_length(self, length: usize) -> Self;
    /// Assert the subject has exactly `count` lines.
    fn to_have_line_count(self, count: usize) -> Self;
    /// Assert the subject equals `other` ignoring ASCII case.
    fn to_equal_ignoring_case(self, other: &str) -> Self;
    /// Assert the subject contains `part` ignoring ASCII case.
    fn to_contain_ignoring_case(self, part: &str) -> Self;
    /// Assert the subject matches the given regular expression.
    ///
    /// An invalid pattern is a usage error, not an assertion failure.
    fn to_match(self, pattern: &str) -> Self;
    /// Assert the subject does not match the given regular expression.
    fn to_not_match(self, pattern: &str) -> Self;
    /// Assert the subject matches the given glob pattern (`*.txt`,
    /// `**/config.json`).
    fn to_match_glob(self, pattern: &str) -> Self;
}

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => report::invalid_argument(format!("invalid regex '{}': {}", pattern, e)),
    }
}

fn compile_glob(pattern: &str) -> Pattern {
    match Pattern::new(pattern) {
        Ok(glob) => glob,
        Err(e) => report::invalid_argument(format!("invalid glob '{}': {}", pattern, e)),
    }
}

impl<S: AsRef<str> + Debug> StrExpectations for Expectation<S> {
    fn to_contain(self, part: &str) -> Self {
        let result = if self.subject.as_ref().contains(part) {
            AssertionResult::pass(format!("string to contain {:?}", part))
        } else {
            AssertionResult::fail(
                format!("string to contain {:?}", part),
                format!("{:?} was not found", part),
            )
        };
        self.verify(result)
    }

    fn to_not_contain(self, part: &str) -> Self {
        let result = if self.subject.as_ref().contains(part) {
            AssertionResult::fail(
                format!("string to not contain {:?}", part),
                format!("{:?} was found", part),
            )
        } else {
            AssertionResult::pass(format!("string to not contain {:?}", part))
        };
        self.verify(result)
    }

    fn to_start_with(self, prefix: &str) -> Self {
        let result = if self.subject.as_ref().starts_with(prefix) {
            AssertionResult::pass(format!("string to start with {:?}", prefix))
        } else {
            AssertionResult::fail(
                format!("string to start with {:?}", prefix),
                "it did not".to_string(),
            )
        };
        self.verify(result)
    }

    fn to_end_with(self, suffix: &str) -> Self {
        let result = if self.subject.as_ref().ends_with(suffix) {
            AssertionResult::pass(format!("string to end with {:?}", suffix))
        } else {
            AssertionResult::fail(
                format!("string to end with {:?}", suffix),
                "it did not".to_string(),
            )
        };
        self.verify(result)
    }

    fn to_be_empty(self) -> Self {
        let result = if self.subject.as_ref().is_empty() {
            AssertionResult::pass("string to be empty")
        } else {
            AssertionResult::fail(
                "string to be empty",
                format!("had {} characters", self.subject.as_ref().chars().count()),
            )
        };
        self.verify(result)
    }

    fn to_not_be_empty(self) -> Self {
        let result = if self.subject.as_ref().is_empty() {
            AssertionResult::fail("string to not be empty", "it was".to_string())
        } else {
            AssertionResult::pass("string to not be empty")
        };
        self.verify(result)
    }

    fn to_have_length(self, length: usize) -> Self {
        let actual = self.subject.as_ref().chars().count();
        let result = if actual == length {
            AssertionResult::pass(format!("string to have length {}", length))
        } else {
            AssertionResult::fail(
                format!("string to have length {}", length),
                format!("had length {}", actual),
            )
        };
        self.verify(result)
    }

    fn to_have_line_count(self, count: usize) -> Self {
        let actual = self.subject.as_ref().lines().count();
        let result = if actual == count {
            AssertionResult::pass(format!("string to have {} lines", count))
        } else {
            AssertionResult::fail(
                format!("string to have {} lines", count),
                format!("had {} lines", actual),
            )
        };
        self.verify(result)
    }

    fn to_equal_ignoring_case(self, other: &str) -> Self {
        let result = if self.subject.as_ref().eq_ignore_ascii_case(other) {
            AssertionResult::pass(format!("string to equal {:?} ignoring case", other))
        } else {
            AssertionResult::fail(
                format!("string to equal {:?} ignoring case", other),
                format!("was {:?}", self.subject.as_ref()),
            )
        };
        self.verify(result)
    }

    fn to_contain_ignoring_case(self, part: &str) -> Self {
        let haystack = self.subject.as_ref().to_ascii_lowercase();
        let result = if haystack.contains(&part.to_ascii_lowercase()) {
            AssertionResult::pass(format!("string to contain {:?} ignoring case", part))
        } else {
            AssertionResult::fail(
                format!("string to contain {:?} ignoring case", part),
                format!("{:?} was not found", part),
            )
        };
        self.verify(result)
    }

    fn to_match(self, pattern: &str) -> Self {
        let re = compile_regex(pattern);
        let result = if re.is_match(self.subject.as_ref()) {
            AssertionResult::pass(format!("string to match pattern {:?}", pattern))
        } else {
            AssertionResult::fail(
                format!("string to match pattern {:?}", pattern),
                "it did not".to_string(),
            )
        };
        self.verify(result)
    }

    fn to_not_match(self, pattern: &str) -> Self {
        let re = compile_regex(pattern);
        let result = if re.is_match(self.subject.as_ref()) {
            AssertionResult::fail(
                format!("string to not match pattern {:?}", pattern),
                "it did".to_string(),
            )
        } else {
            AssertionResult::pass(format!("string to not match pattern {:?}", pattern))
        };
        self.verify(result)
    }

    fn to_match_glob(self, pattern: &str) -> Self {
        let glob = compile_glob(pattern);
        let result = if glob.matches(self.subject.as_ref()) {
            AssertionResult::pass(format!("string to match glob {:?}", pattern))
        } else {
            AssertionResult::fail(
                format!("string to match glob {:?}", pattern),
                "it did not".to_string(),
            )
        };
        self.verify(result)
    }
}
