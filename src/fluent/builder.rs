//! Core fluent wrapper and entry point.
//!
//! This module provides the scalar half of the fluent API:
//! - `expect()` - Entry point wrapping a single subject value
//! - `Expectation<S>` - Holds the subject, the chain context and the active
//!   comparison strategy, and exposes the generic verifications
//!
//! Sequence, map and grouped-map subjects have their own wrappers and entry
//! points (`expect_all`, `expect_map`, `expect_grouped`); category-specific
//! verifications for strings, paths and dates live in extension traits.

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::Serialize;

use crate::compare::Comparison;
use crate::condition::Condition;
use crate::extract;
use crate::report::{self, AssertionResult, Report};

/// Create an expectation on a single subject value.
///
/// This is the entry point for the fluent assertion API. The wrapper owns
/// the subject; verifications either return the wrapper for chaining or
/// panic with a readable failure message.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::expect;
///
/// expect(2 + 2).to_equal(4);
/// expect("hello".len()).to_be_greater_than(3);
/// ```
#[track_caller]
pub fn expect<S>(subject: S) -> Expectation<S> {
    Expectation {
        subject,
        report: Report::here(),
        comparison: Comparison::Natural,
    }
}

/// Fluent wrapper bound to one subject and one active comparison strategy.
///
/// Created by [`expect`]. Verifications evaluate immediately and panic on
/// failure; configuration calls (`described_as`, `with_message`,
/// `using_comparator`) adjust how subsequent verifications in the same
/// chain behave.
#[derive(Debug, Clone)]
pub struct Expectation<S> {
    pub(crate) subject: S,
    pub(crate) report: Report,
    pub(crate) comparison: Comparison<S>,
}

impl<S> Expectation<S> {
    // =========================================================================
    // Chain configuration
    // =========================================================================

    /// Attach a description that prefixes any failure message produced by
    /// this chain.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect(age).described_as("age of the oldest user").to_be_at_most(150);
    /// ```
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.report.description = Some(description.into());
        self
    }

    /// Replace the generated failure message entirely for the verifications
    /// that follow on this chain.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect(code)
    ///     .with_message(format!("deploy {} should have succeeded", id))
    ///     .to_equal(0);
    /// ```
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.report.override_message = Some(message.into());
        self
    }

    /// Install a custom comparator for every subsequent equality and
    /// ordering verification in this chain.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect("Frodo".to_string())
    ///     .using_comparator(|a, b| a.to_lowercase().cmp(&b.to_lowercase()))
    ///     .to_equal("frodo".to_string());
    /// ```
    pub fn using_comparator(mut self, cmp: impl Fn(&S, &S) -> Ordering + 'static) -> Self {
        self.comparison = Comparison::custom(cmp);
        self
    }

    /// Like [`using_comparator`](Self::using_comparator), with a label that
    /// shows up in failure messages.
    pub fn using_comparator_named(
        mut self,
        cmp: impl Fn(&S, &S) -> Ordering + 'static,
        label: impl Into<String>,
    ) -> Self {
        self.comparison = Comparison::custom_named(cmp, label);
        self
    }

    /// Reset to the subject type's own equality and ordering.
    pub fn using_default_comparator(mut self) -> Self {
        self.comparison = Comparison::Natural;
        self
    }

    /// The subject under test.
    pub fn subject(&self) -> &S {
        &self.subject
    }

    /// Unwrap the subject, ending the chain.
    pub fn into_subject(self) -> S {
        self.subject
    }

    // =========================================================================
    // Equality
    // =========================================================================

    /// Assert the subject equals the expected value under the active
    /// comparison strategy.
    ///
    /// # Panics
    ///
    /// Panics if the values differ.
    pub fn to_equal(self, expected: S) -> Self
    where
        S: Debug + PartialEq,
    {
        let result = if self.comparison.eq(&self.subject, &expected) {
            AssertionResult::pass(format!("value to equal {:?}", expected))
        } else {
            AssertionResult::fail(
                format!("value to equal {:?}{}", expected, self.comparison.describe()),
                format!("was {:?}", self.subject),
            )
        };
        self.verify(result)
    }

    /// Assert the subject does not equal the given value under the active
    /// comparison strategy.
    pub fn to_not_equal(self, unexpected: S) -> Self
    where
        S: Debug + PartialEq,
    {
        let result = if self.comparison.eq(&self.subject, &unexpected) {
            AssertionResult::fail(
                format!(
                    "value to not equal {:?}{}",
                    unexpected,
                    self.comparison.describe()
                ),
                format!("was {:?}", self.subject),
            )
        } else {
            AssertionResult::pass(format!("value to not equal {:?}", unexpected))
        };
        self.verify(result)
    }

    /// Assert the subject is one of the given values.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty (usage error) or the subject matches
    /// none of them.
    pub fn to_be_in(self, candidates: &[S]) -> Self
    where
        S: Debug + PartialEq,
    {
        if candidates.is_empty() {
            report::invalid_argument("candidates to look in must not be empty");
        }
        let found = candidates
            .iter()
            .any(|c| self.comparison.eq(&self.subject, c));
        let result = if found {
            AssertionResult::pass(format!("value to be in {:?}", candidates))
        } else {
            AssertionResult::fail(
                format!(
                    "value to be in {:?}{}",
                    candidates,
                    self.comparison.describe()
                ),
                format!("{:?} matched none of them", self.subject),
            )
        };
        self.verify(result)
    }

    /// Assert the subject is none of the given values.
    pub fn to_not_be_in(self, candidates: &[S]) -> Self
    where
        S: Debug + PartialEq,
    {
        if candidates.is_empty() {
            report::invalid_argument("candidates to look in must not be empty");
        }
        let found = candidates
            .iter()
            .any(|c| self.comparison.eq(&self.subject, c));
        let result = if found {
            AssertionResult::fail(
                format!(
                    "value to not be in {:?}{}",
                    candidates,
                    self.comparison.describe()
                ),
                format!("{:?} was found", self.subject),
            )
        } else {
            AssertionResult::pass(format!("value to not be in {:?}", candidates))
        };
        self.verify(result)
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Assert the subject is strictly greater than the given value.
    pub fn to_be_greater_than(self, other: S) -> Self
    where
        S: Debug + PartialOrd,
    {
        self.check_order(other, "greater than", &[Ordering::Greater])
    }

    /// Assert the subject is greater than or equal to the given value.
    pub fn to_be_at_least(self, other: S) -> Self
    where
        S: Debug + PartialOrd,
    {
        self.check_order(other, "at least", &[Ordering::Greater, Ordering::Equal])
    }

    /// Assert the subject is strictly less than the given value.
    pub fn to_be_less_than(self, other: S) -> Self
    where
        S: Debug + PartialOrd,
    {
        self.check_order(other, "less than", &[Ordering::Less])
    }

    /// Assert the subject is less than or equal to the given value.
    pub fn to_be_at_most(self, other: S) -> Self
    where
        S: Debug + PartialOrd,
    {
        self.check_order(other, "at most", &[Ordering::Less, Ordering::Equal])
    }

    /// Assert the subject lies in `[low, high]`, bounds included.
    ///
    /// # Panics
    ///
    /// Panics if `low > high` (usage error) or the subject is outside the
    /// range.
    pub fn to_be_between(self, low: S, high: S) -> Self
    where
        S: Debug + PartialOrd,
    {
        if self.comparison.try_order(&low, &high) == Some(Ordering::Greater) {
            report::invalid_argument(format!("range bounds are inverted: {:?} > {:?}", low, high));
        }
        let description = format!(
            "value to be between {:?} and {:?}{}",
            low,
            high,
            self.comparison.describe()
        );
        let above_low = self.comparison.try_order(&self.subject, &low);
        let below_high = self.comparison.try_order(&self.subject, &high);
        let result = match (above_low, below_high) {
            (Some(a), Some(b)) if a != Ordering::Less && b != Ordering::Greater => {
                AssertionResult::pass(description)
            }
            (Some(_), Some(_)) => {
                AssertionResult::fail(description, format!("was {:?}", self.subject))
            }
            _ => AssertionResult::fail(
                description,
                format!("{:?} is not comparable with the bounds", self.subject),
            ),
        };
        self.verify(result)
    }

    fn check_order(self, other: S, relation: &str, accepted: &[Ordering]) -> Self
    where
        S: Debug + PartialOrd,
    {
        let description = format!(
            "value to be {} {:?}{}",
            relation,
            other,
            self.comparison.describe()
        );
        let result = match self.comparison.try_order(&self.subject, &other) {
            Some(order) if accepted.contains(&order) => AssertionResult::pass(description),
            Some(_) => AssertionResult::fail(description, format!("was {:?}", self.subject)),
            None => AssertionResult::fail(
                description,
                format!("{:?} is not comparable with {:?}", self.subject, other),
            ),
        };
        self.verify(result)
    }

    // =========================================================================
    // Conditions and predicates
    // =========================================================================

    /// Assert the subject satisfies a named condition.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let adult = Condition::new("an adult", |p: &Person| p.age >= 18);
    /// expect(person).to_be(&adult);
    /// ```
    pub fn to_be(self, condition: &Condition<S>) -> Self
    where
        S: Debug,
    {
        let result = if condition.matches(&self.subject) {
            AssertionResult::pass(format!("value to be {}", condition.name()))
        } else {
            AssertionResult::fail(
                format!("value to be {}", condition.name()),
                "it was not".to_string(),
            )
        };
        self.verify(result)
    }

    /// Assert the subject does not satisfy a named condition.
    pub fn to_not_be(self, condition: &Condition<S>) -> Self
    where
        S: Debug,
    {
        let result = if condition.matches(&self.subject) {
            AssertionResult::fail(
                format!("value to not be {}", condition.name()),
                "it was".to_string(),
            )
        } else {
            AssertionResult::pass(format!("value to not be {}", condition.name()))
        };
        self.verify(result)
    }

    /// Assert the subject satisfies a named condition, phrased as a
    /// possession ("to have ...").
    pub fn to_have(self, condition: &Condition<S>) -> Self
    where
        S: Debug,
    {
        let result = if condition.matches(&self.subject) {
            AssertionResult::pass(format!("value to have {}", condition.name()))
        } else {
            AssertionResult::fail(
                format!("value to have {}", condition.name()),
                "it did not".to_string(),
            )
        };
        self.verify(result)
    }

    /// Assert the subject satisfies an anonymous predicate.
    pub fn to_satisfy(self, predicate: impl FnOnce(&S) -> bool) -> Self
    where
        S: Debug,
    {
        let result = if predicate(&self.subject) {
            AssertionResult::pass("value to satisfy the given predicate")
        } else {
            AssertionResult::fail(
                "value to satisfy the given predicate",
                format!("{:?} did not", self.subject),
            )
        };
        self.verify(result)
    }

    // =========================================================================
    // Field-wise comparison
    // =========================================================================

    /// Assert the named fields of the subject equal the same fields of
    /// `other`, ignoring every other field.
    ///
    /// Fields are dotted paths resolved over the serialized form of both
    /// values; a path missing on either side is an introspection error.
    pub fn to_equal_comparing_fields(self, other: &S, fields: &[&str]) -> Self
    where
        S: Debug + Serialize,
    {
        if fields.is_empty() {
            report::invalid_argument("fields to compare must not be empty");
        }
        let own = extract::subject_value(&self.subject, "subject");
        let expected = extract::subject_value(other, "expected value");
        let mut mismatches: Vec<String> = Vec::new();
        for path in fields {
            let mine = match extract::resolve_path(&own, path) {
                Ok(v) => v,
                Err(e) => report::introspection_error(format!(
                    "no value at path '{}' on subject: {:?}",
                    path, e
                )),
            };
            let theirs = match extract::resolve_path(&expected, path) {
                Ok(v) => v,
                Err(e) => report::introspection_error(format!(
                    "no value at path '{}' on expected value: {:?}",
                    path, e
                )),
            };
            if mine != theirs {
                mismatches.push(format!("field '{}': {} != {}", path, mine, theirs));
            }
        }
        let description = format!("values to be equal comparing fields {:?}", fields);
        let result = if mismatches.is_empty() {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, mismatches.join("; "))
        };
        self.verify(result)
    }

    /// Assert every field of the subject equals the same field of `other`,
    /// except the named ones.
    ///
    /// Both values must serialize as structures.
    pub fn to_equal_ignoring_fields(self, other: &S, ignored: &[&str]) -> Self
    where
        S: Debug + Serialize,
    {
        let own = extract::subject_value(&self.subject, "subject");
        let expected = extract::subject_value(other, "expected value");
        let (own_map, expected_map) = match (own, expected) {
            (serde_json::Value::Object(a), serde_json::Value::Object(b)) => (a, b),
            _ => report::introspection_error("values do not expose named fields"),
        };
        let mut mismatches: Vec<String> = Vec::new();
        let mut keys: Vec<&String> = own_map.keys().chain(expected_map.keys()).collect();
        keys.sort();
        keys.dedup();
        for key in keys {
            if ignored.contains(&key.as_str()) {
                continue;
            }
            match (own_map.get(key), expected_map.get(key)) {
                (Some(a), Some(b)) if a == b => {}
                (Some(a), Some(b)) => {
                    mismatches.push(format!("field '{}': {} != {}", key, a, b));
                }
                (Some(a), None) => mismatches.push(format!("field '{}': {} != <absent>", key, a)),
                (None, Some(b)) => mismatches.push(format!("field '{}': <absent> != {}", key, b)),
                (None, None) => {}
            }
        }
        let description = format!("values to be equal ignoring fields {:?}", ignored);
        let result = if mismatches.is_empty() {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, mismatches.join("; "))
        };
        self.verify(result)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    pub(crate) fn verify(self, result: AssertionResult) -> Self
    where
        S: Debug,
    {
        if result.passed {
            return self;
        }
        let rendered = report::preview(&format!("{:?}", self.subject), 120);
        let subject_line = format!("  subject: {}\n", rendered);
        self.report.raise(&result, &subject_line)
    }
}

// =============================================================================
// Booleans
// =============================================================================

impl Expectation<bool> {
    /// Assert the subject is `true`.
    pub fn to_be_true(self) -> Self {
        let result = if self.subject {
            AssertionResult::pass("value to be true")
        } else {
            AssertionResult::fail("value to be true", "was false")
        };
        self.verify(result)
    }

    /// Assert the subject is `false`.
    pub fn to_be_false(self) -> Self {
        let result = if self.subject {
            AssertionResult::fail("value to be false", "was true")
        } else {
            AssertionResult::pass("value to be false")
        };
        self.verify(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_equal_passes_and_chains() {
        expect(5).to_equal(5).to_not_equal(6).to_equal(5);
    }

    #[test]
    #[should_panic(expected = "assertion failed: expected value to equal 5")]
    fn test_to_equal_fails_with_both_values() {
        expect(6).to_equal(5);
    }

    #[test]
    fn test_failure_message_contains_subject() {
        let failure = std::panic::catch_unwind(|| {
            expect(6).to_equal(5);
        })
        .unwrap_err();
        let message = failure.downcast_ref::<String>().unwrap();
        assert!(message.contains("was 6"));
        assert!(message.contains("subject: 6"));
    }

    #[test]
    fn test_custom_comparator_changes_equality() {
        expect(-3)
            .using_comparator(|a: &i32, b: &i32| a.abs().cmp(&b.abs()))
            .to_equal(3);
    }

    #[test]
    fn test_default_comparator_round_trip() {
        // Installing and resetting behaves as if nothing was installed.
        expect(-3)
            .using_comparator(|a: &i32, b: &i32| a.abs().cmp(&b.abs()))
            .using_default_comparator()
            .to_not_equal(3)
            .to_equal(-3);
    }

    #[test]
    #[should_panic(expected = "using absolute value")]
    fn test_comparator_label_shows_in_failure() {
        expect(-3)
            .using_comparator_named(|a: &i32, b: &i32| a.abs().cmp(&b.abs()), "absolute value")
            .to_equal(4);
    }

    #[test]
    fn test_ordering_family() {
        expect(5)
            .to_be_greater_than(4)
            .to_be_at_least(5)
            .to_be_less_than(6)
            .to_be_at_most(5)
            .to_be_between(4, 6)
            .to_be_between(5, 5);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_between_excludes_outside() {
        expect(7).to_be_between(4, 6);
    }

    #[test]
    #[should_panic(expected = "invalid argument: range bounds are inverted")]
    fn test_between_rejects_inverted_bounds() {
        expect(5).to_be_between(6, 4);
    }

    #[test]
    #[should_panic(expected = "not comparable")]
    fn test_nan_is_not_comparable() {
        expect(f64::NAN).to_be_greater_than(1.0);
    }

    #[test]
    fn test_membership() {
        expect("b").to_be_in(&["a", "b", "c"]).to_not_be_in(&["x", "y"]);
    }

    #[test]
    #[should_panic(expected = "invalid argument: candidates to look in must not be empty")]
    fn test_membership_requires_candidates() {
        expect(1).to_be_in(&[]);
    }

    #[test]
    fn test_conditions() {
        let even = Condition::new("an even number", |n: &i32| n % 2 == 0);
        expect(4).to_be(&even).to_have(&even);
        expect(3).to_not_be(&even);
    }

    #[test]
    #[should_panic(expected = "expected value to be an even number")]
    fn test_condition_failure_names_condition() {
        let even = Condition::new("an even number", |n: &i32| n % 2 == 0);
        expect(3).to_be(&even);
    }

    #[test]
    fn test_to_satisfy() {
        expect("abc").to_satisfy(|s| s.len() == 3);
    }

    #[test]
    fn test_booleans() {
        expect(1 + 1 == 2).to_be_true();
        expect(1 > 2).to_be_false();
    }

    #[test]
    #[should_panic(expected = "assertion failed: all sevens")]
    fn test_with_message_overrides_entirely() {
        expect(6).with_message("all sevens").to_equal(7);
    }

    #[test]
    #[should_panic(expected = "[response size]")]
    fn test_described_as_prefixes() {
        expect(6).described_as("response size").to_equal(7);
    }

    #[derive(Debug, serde::Serialize)]
    struct User {
        name: String,
        age: u32,
        id: u64,
    }

    #[test]
    fn test_comparing_fields() {
        let a = User { name: "Ada".into(), age: 36, id: 1 };
        let b = User { name: "Ada".into(), age: 36, id: 2 };
        expect(a).to_equal_comparing_fields(&b, &["name", "age"]);
    }

    #[test]
    #[should_panic(expected = "field 'id': 1 != 2")]
    fn test_comparing_fields_reports_mismatch() {
        let a = User { name: "Ada".into(), age: 36, id: 1 };
        let b = User { name: "Ada".into(), age: 36, id: 2 };
        expect(a).to_equal_comparing_fields(&b, &["name", "id"]);
    }

    #[test]
    fn test_ignoring_fields() {
        let a = User { name: "Ada".into(), age: 36, id: 1 };
        let b = User { name: "Ada".into(), age: 36, id: 2 };
        expect(a).to_equal_ignoring_fields(&b, &["id"]);
    }

    #[test]
    #[should_panic(expected = "introspection error")]
    fn test_comparing_fields_missing_member() {
        let a = User { name: "Ada".into(), age: 36, id: 1 };
        let b = User { name: "Ada".into(), age: 36, id: 2 };
        expect(a).to_equal_comparing_fields(&b, &["name", "address"]);
    }
}
