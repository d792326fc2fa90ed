//! Fluent wrapper for sequence subjects.
//!
//! This module provides the collection half of the fluent API:
//! - `expect_all()` - Entry point for anything iterable (vectors, arrays,
//!   ranges, iterators)
//! - `SeqExpectation` - Holds the elements and the element-wise comparison
//!   strategy, and exposes containment, ordering, extraction and filtering
//!
//! Extraction and filtering return a new, narrower wrapper; the chain
//! description carries forward, the element comparator does not.

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

use crate::compare::Comparison;
use crate::condition::Condition;
use crate::extract;
use crate::report::{self, AssertionResult, Report};

use super::builder::Expectation;

/// A zero-based position argument, built with [`at_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(pub(crate) usize);

/// Build a position argument for
/// [`to_contain_at`](SeqExpectation::to_contain_at) and
/// [`element_at`](SeqExpectation::element_at).
pub fn at_index(index: usize) -> Index {
    Index(index)
}

/// Create an expectation on the elements of anything iterable.
///
/// This is the sequence entry point of the fluent API. It accepts vectors,
/// arrays, ranges and arbitrary iterators; elements are collected up front
/// in iteration order.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::expect_all;
///
/// expect_all(["a", "b", "c"])
///     .to_have_size(3)
///     .to_contain(["a", "b"])
///     .to_be_sorted();
/// ```
#[track_caller]
pub fn expect_all<I: IntoIterator>(iterable: I) -> SeqExpectation<I::Item> {
    SeqExpectation {
        elements: iterable.into_iter().collect(),
        report: Report::here(),
        comparison: Comparison::Natural,
    }
}

/// Fluent wrapper over a sequence of elements.
///
/// Created by [`expect_all`]. Verifications evaluate immediately and panic
/// on failure. Containment checks route through the element-wise comparison
/// strategy installed with `using_comparator`.
#[derive(Debug, Clone)]
pub struct SeqExpectation<T> {
    pub(crate) elements: Vec<T>,
    pub(crate) report: Report,
    pub(crate) comparison: Comparison<T>,
}

impl<T> SeqExpectation<T> {
    // =========================================================================
    // Chain configuration
    // =========================================================================

    /// Attach a description that prefixes any failure message produced by
    /// this chain.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.report.description = Some(description.into());
        self
    }

    /// Replace the generated failure message entirely for the verifications
    /// that follow on this chain.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.report.override_message = Some(message.into());
        self
    }

    /// Install an element-wise comparator for every subsequent containment
    /// and ordering verification in this chain.
    pub fn using_comparator(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.comparison = Comparison::custom(cmp);
        self
    }

    /// Like [`using_comparator`](Self::using_comparator), with a label that
    /// shows up in failure messages.
    pub fn using_comparator_named(
        mut self,
        cmp: impl Fn(&T, &T) -> Ordering + 'static,
        label: impl Into<String>,
    ) -> Self {
        self.comparison = Comparison::custom_named(cmp, label);
        self
    }

    /// Reset to the element type's own equality and ordering.
    pub fn using_default_comparator(mut self) -> Self {
        self.comparison = Comparison::Natural;
        self
    }

    /// The elements under test.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Unwrap the elements, ending the chain.
    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }

    // =========================================================================
    // Size
    // =========================================================================

    /// Assert the sequence has exactly `size` elements.
    pub fn to_have_size(self, size: usize) -> Self
    where
        T: Debug,
    {
        let actual = self.elements.len();
        let result = if actual == size {
            AssertionResult::pass(format!("elements to have size {}", size))
        } else {
            AssertionResult::fail(
                format!("elements to have size {}", size),
                format!("had size {}", actual),
            )
        };
        self.verify(result)
    }

    /// Assert the sequence is empty.
    pub fn to_be_empty(self) -> Self
    where
        T: Debug,
    {
        let actual = self.elements.len();
        let result = if actual == 0 {
            AssertionResult::pass("elements to be empty")
        } else {
            AssertionResult::fail("elements to be empty", format!("had size {}", actual))
        };
        self.verify(result)
    }

    /// Assert the sequence is not empty.
    pub fn to_not_be_empty(self) -> Self
    where
        T: Debug,
    {
        let result = if self.elements.is_empty() {
            AssertionResult::fail("elements to not be empty", "the sequence was empty".to_string())
        } else {
            AssertionResult::pass("elements to not be empty")
        };
        self.verify(result)
    }

    // =========================================================================
    // Containment
    // =========================================================================

    /// Assert the sequence contains every expected element, in any order.
    ///
    /// # Panics
    ///
    /// Panics if `expected` is empty (usage error) or any expected element
    /// is missing.
    pub fn to_contain(self, expected: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let expected = self.required(expected, "elements to look for");
        let missing: Vec<&T> = expected
            .iter()
            .filter(|e| !self.holds(e))
            .collect();
        let description = format!(
            "elements to contain {:?}{}",
            expected,
            self.comparison.describe()
        );
        let result = if missing.is_empty() {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("{:?} not found", missing))
        };
        self.verify(result)
    }

    /// Assert the sequence contains none of the given elements.
    pub fn to_not_contain(self, unexpected: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let unexpected = self.required(unexpected, "elements to look for");
        let found: Vec<&T> = unexpected.iter().filter(|e| self.holds(e)).collect();
        let description = format!(
            "elements to not contain {:?}{}",
            unexpected,
            self.comparison.describe()
        );
        let result = if found.is_empty() {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("{:?} found", found))
        };
        self.verify(result)
    }

    /// Assert the sequence contains exactly the given elements in the same
    /// order. An empty `expected` asserts the sequence is empty.
    pub fn to_contain_exactly(self, expected: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let expected: Vec<T> = expected.into_iter().collect();
        let description = format!(
            "elements to contain exactly {:?}{}",
            expected,
            self.comparison.describe()
        );
        let result = if expected.len() != self.elements.len() {
            AssertionResult::fail(
                description,
                format!("expected {} elements, had {}", expected.len(), self.elements.len()),
            )
        } else {
            match self
                .elements
                .iter()
                .zip(expected.iter())
                .position(|(a, e)| !self.comparison.eq(a, e))
            {
                Some(i) => AssertionResult::fail(
                    description,
                    format!(
                        "element at index {} was {:?}, expected {:?}",
                        i, self.elements[i], expected[i]
                    ),
                ),
                None => AssertionResult::pass(description),
            }
        };
        self.verify(result)
    }

    /// Assert the sequence contains exactly the given elements, order
    /// ignored, duplicates respected.
    pub fn to_contain_exactly_in_any_order(self, expected: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let expected: Vec<T> = expected.into_iter().collect();
        let description = format!(
            "elements to contain exactly in any order {:?}{}",
            expected,
            self.comparison.describe()
        );
        let mut used = vec![false; self.elements.len()];
        let mut unmatched: Vec<&T> = Vec::new();
        for e in &expected {
            match self
                .elements
                .iter()
                .enumerate()
                .position(|(i, a)| !used[i] && self.comparison.eq(a, e))
            {
                Some(i) => used[i] = true,
                None => unmatched.push(e),
            }
        }
        let leftover = used.iter().filter(|u| !**u).count();
        let result = if unmatched.is_empty() && leftover == 0 {
            AssertionResult::pass(description)
        } else if !unmatched.is_empty() {
            AssertionResult::fail(description, format!("{:?} not found", unmatched))
        } else {
            AssertionResult::fail(description, format!("{} unexpected elements remain", leftover))
        };
        self.verify(result)
    }

    /// Assert every element is one of the given values and every given
    /// value appears at least once; duplicates are ignored.
    pub fn to_contain_only(self, expected: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let expected = self.required(expected, "elements to look for");
        let description = format!(
            "elements to contain only {:?}{}",
            expected,
            self.comparison.describe()
        );
        let stray: Vec<&T> = self
            .elements
            .iter()
            .filter(|a| !expected.iter().any(|e| self.comparison.eq(a, e)))
            .collect();
        let missing: Vec<&T> = expected.iter().filter(|e| !self.holds(e)).collect();
        let result = if stray.is_empty() && missing.is_empty() {
            AssertionResult::pass(description)
        } else if !stray.is_empty() {
            AssertionResult::fail(description, format!("unexpected elements {:?}", stray))
        } else {
            AssertionResult::fail(description, format!("{:?} not found", missing))
        };
        self.verify(result)
    }

    /// Assert the given element appears exactly once.
    pub fn to_contain_once(self, expected: T) -> Self
    where
        T: Debug + PartialEq,
    {
        let count = self
            .elements
            .iter()
            .filter(|a| self.comparison.eq(a, &expected))
            .count();
        let description = format!(
            "elements to contain {:?} exactly once{}",
            expected,
            self.comparison.describe()
        );
        let result = if count == 1 {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("found {} occurrences", count))
        };
        self.verify(result)
    }

    /// Assert the given element appears at the given zero-based position.
    pub fn to_contain_at(self, expected: T, index: Index) -> Self
    where
        T: Debug + PartialEq,
    {
        let description = format!(
            "elements to contain {:?} at index {}{}",
            expected,
            index.0,
            self.comparison.describe()
        );
        let result = match self.elements.get(index.0) {
            None => AssertionResult::fail(
                description,
                format!("index {} is out of bounds for size {}", index.0, self.elements.len()),
            ),
            Some(actual) if self.comparison.eq(actual, &expected) => {
                AssertionResult::pass(description)
            }
            Some(actual) => {
                AssertionResult::fail(description, format!("found {:?} there", actual))
            }
        };
        self.verify(result)
    }

    /// Assert the sequence starts with the given prefix, in order.
    pub fn to_start_with(self, prefix: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let prefix = self.required(prefix, "prefix elements");
        let description = format!(
            "elements to start with {:?}{}",
            prefix,
            self.comparison.describe()
        );
        let matches = prefix.len() <= self.elements.len()
            && prefix
                .iter()
                .zip(self.elements.iter())
                .all(|(e, a)| self.comparison.eq(a, e));
        let result = if matches {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, "it did not".to_string())
        };
        self.verify(result)
    }

    /// Assert the sequence ends with the given suffix, in order.
    pub fn to_end_with(self, suffix: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let suffix = self.required(suffix, "suffix elements");
        let description = format!(
            "elements to end with {:?}{}",
            suffix,
            self.comparison.describe()
        );
        let matches = suffix.len() <= self.elements.len() && {
            let offset = self.elements.len() - suffix.len();
            suffix
                .iter()
                .enumerate()
                .all(|(i, e)| self.comparison.eq(&self.elements[offset + i], e))
        };
        let result = if matches {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, "it did not".to_string())
        };
        self.verify(result)
    }

    /// Assert the given elements appear somewhere in the sequence as a
    /// contiguous run. The earliest starting index is the one checked and
    /// reported.
    pub fn to_contain_sequence(self, run: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let run = self.required(run, "sequence elements");
        let description = format!(
            "elements to contain the sequence {:?}{}",
            run,
            self.comparison.describe()
        );
        let result = if self.find_window(&run).is_some() {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, "no contiguous run matched".to_string())
        };
        self.verify(result)
    }

    /// Assert the given elements appear in the sequence in order, allowing
    /// gaps. Matching is greedy from the start.
    pub fn to_contain_subsequence(self, sub: impl IntoIterator<Item = T>) -> Self
    where
        T: Debug + PartialEq,
    {
        let sub = self.required(sub, "subsequence elements");
        let description = format!(
            "elements to contain the subsequence {:?}{}",
            sub,
            self.comparison.describe()
        );
        let mut pending = sub.iter();
        let mut next = pending.next();
        for a in &self.elements {
            if let Some(e) = next {
                if self.comparison.eq(a, e) {
                    next = pending.next();
                }
            }
        }
        let result = match next {
            None => AssertionResult::pass(description),
            Some(e) => AssertionResult::fail(
                description,
                format!("{:?} was not reached in order", e),
            ),
        };
        self.verify(result)
    }

    // =========================================================================
    // Ordering and duplicates
    // =========================================================================

    /// Assert the elements are in non-decreasing order under the active
    /// comparison strategy. Empty and single-element sequences are sorted.
    pub fn to_be_sorted(self) -> Self
    where
        T: Debug + PartialOrd,
    {
        let description = format!("elements to be sorted{}", self.comparison.describe());
        let mut failure: Option<String> = None;
        for i in 1..self.elements.len() {
            match self.comparison.try_order(&self.elements[i - 1], &self.elements[i]) {
                Some(Ordering::Greater) => {
                    failure = Some(format!(
                        "element at index {} ({:?}) is greater than element at index {} ({:?})",
                        i - 1,
                        self.elements[i - 1],
                        i,
                        self.elements[i]
                    ));
                    break;
                }
                None => {
                    failure = Some(format!(
                        "elements at indexes {} and {} are not comparable",
                        i - 1,
                        i
                    ));
                    break;
                }
                _ => {}
            }
        }
        let result = match failure {
            None => AssertionResult::pass(description),
            Some(reason) => AssertionResult::fail(description, reason),
        };
        self.verify(result)
    }

    /// Assert the elements are in non-decreasing order under the given
    /// comparator. The chain's comparison strategy is not consulted.
    pub fn to_be_sorted_by(self, cmp: impl Fn(&T, &T) -> Ordering) -> Self
    where
        T: Debug,
    {
        let description = "elements to be sorted by the given comparator".to_string();
        let out_of_order = (1..self.elements.len())
            .find(|&i| cmp(&self.elements[i - 1], &self.elements[i]) == Ordering::Greater);
        let result = match out_of_order {
            None => AssertionResult::pass(description),
            Some(i) => AssertionResult::fail(
                description,
                format!(
                    "element at index {} ({:?}) is greater than element at index {} ({:?})",
                    i - 1,
                    self.elements[i - 1],
                    i,
                    self.elements[i]
                ),
            ),
        };
        self.verify(result)
    }

    /// Assert no element appears more than once under the active comparison
    /// strategy. An empty sequence passes.
    pub fn to_not_have_duplicates(self) -> Self
    where
        T: Debug + PartialEq,
    {
        let description = format!(
            "elements to not have duplicates{}",
            self.comparison.describe()
        );
        let mut duplicated: Vec<&T> = Vec::new();
        for i in 0..self.elements.len() {
            let earlier_copy = (0..i).any(|j| self.comparison.eq(&self.elements[j], &self.elements[i]));
            if earlier_copy {
                continue;
            }
            let later_copy = (i + 1..self.elements.len())
                .any(|j| self.comparison.eq(&self.elements[j], &self.elements[i]));
            if later_copy {
                duplicated.push(&self.elements[i]);
            }
        }
        let result = if duplicated.is_empty() {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("{:?} appear more than once", duplicated))
        };
        self.verify(result)
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// Assert every element satisfies the condition. An empty sequence
    /// passes.
    pub fn to_each_be(self, condition: &Condition<T>) -> Self
    where
        T: Debug,
    {
        let description = format!("each element to be {}", condition.name());
        let offender = self
            .elements
            .iter()
            .position(|a| !condition.matches(a));
        let result = match offender {
            None => AssertionResult::pass(description),
            Some(i) => AssertionResult::fail(
                description,
                format!("element at index {} ({:?}) was not", i, self.elements[i]),
            ),
        };
        self.verify(result)
    }

    /// Assert at least `count` elements satisfy the condition.
    pub fn to_have_at_least(self, count: usize, condition: &Condition<T>) -> Self
    where
        T: Debug,
    {
        let matching = self.count_matching(condition);
        let description = format!("at least {} elements to be {}", count, condition.name());
        let result = if matching >= count {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("only {} were", matching))
        };
        self.verify(result)
    }

    /// Assert at most `count` elements satisfy the condition.
    pub fn to_have_at_most(self, count: usize, condition: &Condition<T>) -> Self
    where
        T: Debug,
    {
        let matching = self.count_matching(condition);
        let description = format!("at most {} elements to be {}", count, condition.name());
        let result = if matching <= count {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("{} were", matching))
        };
        self.verify(result)
    }

    /// Assert exactly `count` elements satisfy the condition.
    pub fn to_have_exactly(self, count: usize, condition: &Condition<T>) -> Self
    where
        T: Debug,
    {
        let matching = self.count_matching(condition);
        let description = format!("exactly {} elements to be {}", count, condition.name());
        let result = if matching == count {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("{} were", matching))
        };
        self.verify(result)
    }

    /// Assert at least one element satisfies the condition.
    pub fn to_have_any(self, condition: &Condition<T>) -> Self
    where
        T: Debug,
    {
        let description = format!("any element to be {}", condition.name());
        let result = if self.elements.iter().any(|a| condition.matches(a)) {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, "none were".to_string())
        };
        self.verify(result)
    }

    /// Assert no element satisfies the condition. An empty sequence passes.
    pub fn to_have_none(self, condition: &Condition<T>) -> Self
    where
        T: Debug,
    {
        let description = format!("no element to be {}", condition.name());
        let offender = self.elements.iter().position(|a| condition.matches(a));
        let result = match offender {
            None => AssertionResult::pass(description),
            Some(i) => AssertionResult::fail(
                description,
                format!("element at index {} ({:?}) was", i, self.elements[i]),
            ),
        };
        self.verify(result)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to the element at the given position, failing if it does
    /// not exist.
    pub fn element_at(mut self, index: Index) -> Expectation<T>
    where
        T: Debug,
    {
        if index.0 >= self.elements.len() {
            let result = AssertionResult::fail(
                format!("an element at index {}", index.0),
                format!("the sequence has size {}", self.elements.len()),
            );
            let rendering = self.format_elements();
            self.report.raise(&result, &rendering);
        }
        Expectation {
            subject: self.elements.swap_remove(index.0),
            report: self.report.child(),
            comparison: Comparison::Natural,
        }
    }

    /// Navigate to the first element, failing if the sequence is empty.
    pub fn first(self) -> Expectation<T>
    where
        T: Debug,
    {
        self.element_at(Index(0))
    }

    /// Navigate to the last element, failing if the sequence is empty.
    pub fn last(self) -> Expectation<T>
    where
        T: Debug,
    {
        if self.elements.is_empty() {
            let result = AssertionResult::fail(
                "a last element",
                "the sequence was empty".to_string(),
            );
            self.report.raise(&result, "  elements: (none)\n");
        }
        let index = self.elements.len() - 1;
        self.element_at(Index(index))
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Derive a new expectation by applying a function to every element,
    /// preserving order.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect_all(users)
    ///     .extracting(|u| u.age)
    ///     .to_contain([33, 36]);
    /// ```
    pub fn extracting<U>(self, f: impl Fn(&T) -> U) -> SeqExpectation<U> {
        SeqExpectation {
            elements: self.elements.iter().map(f).collect(),
            report: self.report.child(),
            comparison: Comparison::Natural,
        }
    }

    /// Like [`extracting`](Self::extracting) for fallible extractors: an
    /// `Err` aborts the chain with the source error in the failure message,
    /// a panic from the extractor propagates unchanged.
    pub fn try_extracting<U, E: std::fmt::Display>(
        self,
        f: impl Fn(&T) -> Result<U, E>,
    ) -> SeqExpectation<U> {
        let mut extracted = Vec::with_capacity(self.elements.len());
        for (i, element) in self.elements.iter().enumerate() {
            match f(element) {
                Ok(value) => extracted.push(value),
                Err(e) => report::extraction_failure(format!(
                    "extractor failed on element at index {}: {}",
                    i, e
                )),
            }
        }
        SeqExpectation {
            elements: extracted,
            report: self.report.child(),
            comparison: Comparison::Natural,
        }
    }

    /// Derive a new expectation over the values at a dotted property path,
    /// resolved on the serialized form of each element.
    ///
    /// A member that is present but null yields JSON null at that position;
    /// a missing member is an introspection error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect_all(users)
    ///     .extracting_path("name.first")
    ///     .to_contain([json!("Ada"), json!("Grace")]);
    /// ```
    pub fn extracting_path(self, path: &str) -> SeqExpectation<Value>
    where
        T: Serialize,
    {
        let elements = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| extract::extract_path(e, path, i))
            .collect();
        SeqExpectation {
            elements,
            report: self.report.child(),
            comparison: Comparison::Natural,
        }
    }

    /// Extract several property paths per element, producing one row of
    /// values per element in input order.
    pub fn extracting_paths(self, paths: &[&str]) -> SeqExpectation<Vec<Value>>
    where
        T: Serialize,
    {
        if paths.is_empty() {
            report::invalid_argument("property paths must not be empty");
        }
        let elements = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| {
                paths
                    .iter()
                    .map(|p| extract::extract_path(e, p, i))
                    .collect::<Vec<Value>>()
            })
            .collect();
        SeqExpectation {
            elements,
            report: self.report.child(),
            comparison: Comparison::Natural,
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Keep only the elements whose property at `path` equals the given
    /// value, preserving relative order.
    ///
    /// The value must not serialize to null; filtering on null is its own
    /// operation, [`filtered_on_null`](Self::filtered_on_null).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect_all(hobbits)
    ///     .filtered_on("age", 33)
    ///     .extracting(|h| h.name.clone())
    ///     .to_contain_exactly(["Frodo".to_string()]);
    /// ```
    pub fn filtered_on(self, path: &str, value: impl Serialize) -> Self
    where
        T: Serialize,
    {
        let wanted = match serde_json::to_value(&value) {
            Ok(v) => v,
            Err(e) => report::invalid_argument(format!("filter value is not serializable: {}", e)),
        };
        if wanted.is_null() {
            report::invalid_argument(
                "filter value must not be null, use filtered_on_null instead",
            );
        }
        self.retain_matching(path, |found| *found == wanted)
    }

    /// Keep only the elements whose property at `path` is null,
    /// preserving relative order.
    pub fn filtered_on_null(self, path: &str) -> Self
    where
        T: Serialize,
    {
        self.retain_matching(path, |found| found.is_null())
    }

    /// Keep only the elements satisfying the condition, preserving relative
    /// order.
    pub fn filtered_on_condition(mut self, condition: &Condition<T>) -> Self {
        self.elements.retain(|e| condition.matches(e));
        self
    }

    /// Keep only the elements satisfying the predicate, preserving relative
    /// order.
    pub fn filtered(mut self, predicate: impl Fn(&T) -> bool) -> Self {
        self.elements.retain(|e| predicate(e));
        self
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn retain_matching(mut self, path: &str, keep: impl Fn(&Value) -> bool) -> Self
    where
        T: Serialize,
    {
        if path.is_empty() {
            report::invalid_argument("filter path must not be empty");
        }
        let mut kept = Vec::new();
        for (i, element) in self.elements.into_iter().enumerate() {
            let found = extract::extract_path(&element, path, i);
            if keep(&found) {
                kept.push(element);
            }
        }
        self.elements = kept;
        self
    }

    fn holds(&self, expected: &T) -> bool
    where
        T: PartialEq,
    {
        self.elements.iter().any(|a| self.comparison.eq(a, expected))
    }

    fn find_window(&self, run: &[T]) -> Option<usize>
    where
        T: PartialEq,
    {
        if run.len() > self.elements.len() {
            return None;
        }
        (0..=self.elements.len() - run.len()).find(|&start| {
            run.iter()
                .enumerate()
                .all(|(i, e)| self.comparison.eq(&self.elements[start + i], e))
        })
    }

    fn count_matching(&self, condition: &Condition<T>) -> usize {
        self.elements.iter().filter(|a| condition.matches(a)).count()
    }

    fn required(&self, items: impl IntoIterator<Item = T>, what: &str) -> Vec<T> {
        let collected: Vec<T> = items.into_iter().collect();
        if collected.is_empty() {
            report::invalid_argument(format!("{} must not be empty", what));
        }
        collected
    }

    fn format_elements(&self) -> String
    where
        T: Debug,
    {
        if self.elements.is_empty() {
            return "  elements: (none)\n".to_string();
        }
        let mut output = format!("  elements ({}):\n", self.elements.len());
        for (i, element) in self.elements.iter().take(10).enumerate() {
            output.push_str(&format!(
                "    {}. {}\n",
                i + 1,
                report::preview(&format!("{:?}", element), 60)
            ));
        }
        if self.elements.len() > 10 {
            output.push_str(&format!("    ... {} more\n", self.elements.len() - 10));
        }
        output
    }

    pub(crate) fn verify(self, result: AssertionResult) -> Self
    where
        T: Debug,
    {
        if result.passed {
            return self;
        }
        let rendering = self.format_elements();
        self.report.raise(&result, &rendering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Hobbit {
        name: String,
        age: u32,
        nickname: Option<String>,
    }

    fn hobbits() -> Vec<Hobbit> {
        vec![
            Hobbit { name: "Frodo".into(), age: 33, nickname: Some("Ring-bearer".into()) },
            Hobbit { name: "Sam".into(), age: 38, nickname: None },
            Hobbit { name: "Pippin".into(), age: 28, nickname: Some("Fool of a Took".into()) },
        ]
    }

    #[test]
    fn test_contains_in_any_order() {
        expect_all(["a", "b", "c"]).to_contain(["c", "a"]);
    }

    #[test]
    #[should_panic(expected = "[\"z\"] not found")]
    fn test_contains_reports_missing() {
        expect_all(["a", "b", "c"]).to_contain(["z"]);
    }

    #[test]
    #[should_panic(expected = "invalid argument: elements to look for must not be empty")]
    fn test_contains_requires_elements() {
        expect_all(["a"]).to_contain(Vec::<&str>::new());
    }

    #[test]
    fn test_contains_exactly_checks_order() {
        expect_all([1, 2, 3]).to_contain_exactly([1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "element at index 1 was 3")]
    fn test_contains_exactly_rejects_wrong_order() {
        expect_all([1, 3, 2]).to_contain_exactly([1, 2, 3]);
    }

    #[test]
    fn test_contains_exactly_in_any_order_respects_duplicates() {
        expect_all([2, 1, 2]).to_contain_exactly_in_any_order([1, 2, 2]);
    }

    #[test]
    #[should_panic(expected = "[2] not found")]
    fn test_any_order_counts_occurrences() {
        expect_all([1, 2]).to_contain_exactly_in_any_order([1, 2, 2]);
    }

    #[test]
    fn test_contains_only_ignores_duplicates() {
        expect_all(["a", "a", "b"]).to_contain_only(["b", "a"]);
    }

    #[test]
    #[should_panic(expected = "unexpected elements")]
    fn test_contains_only_rejects_strays() {
        expect_all(["a", "x"]).to_contain_only(["a"]);
    }

    #[test]
    fn test_contains_once_and_at() {
        expect_all(["a", "b", "a"])
            .to_contain_once("b")
            .to_contain_at("b", at_index(1));
    }

    #[test]
    #[should_panic(expected = "found 2 occurrences")]
    fn test_contains_once_rejects_repeats() {
        expect_all(["a", "b", "a"]).to_contain_once("a");
    }

    #[test]
    fn test_prefix_suffix_and_runs() {
        expect_all([1, 2, 3, 4, 5])
            .to_start_with([1, 2])
            .to_end_with([4, 5])
            .to_contain_sequence([2, 3, 4])
            .to_contain_subsequence([1, 3, 5]);
    }

    #[test]
    #[should_panic(expected = "no contiguous run matched")]
    fn test_sequence_must_be_contiguous() {
        expect_all([1, 2, 3, 4, 5]).to_contain_sequence([1, 3]);
    }

    #[test]
    #[should_panic(expected = "5 was not reached in order")]
    fn test_subsequence_must_preserve_order() {
        expect_all([5, 3, 1]).to_contain_subsequence([1, 5]);
    }

    #[test]
    fn test_sorted_is_vacuous_for_empty_and_singleton() {
        expect_all(Vec::<i32>::new()).to_be_sorted();
        expect_all([7]).to_be_sorted();
        expect_all([1, 1, 2]).to_be_sorted();
    }

    #[test]
    #[should_panic(expected = "is greater than element at index")]
    fn test_sorted_rejects_descent() {
        expect_all([1, 3, 2]).to_be_sorted();
    }

    #[test]
    fn test_sorted_by_custom_comparator() {
        expect_all([3, 2, 1]).to_be_sorted_by(|a, b| b.cmp(a));
    }

    #[test]
    fn test_duplicates_vacuous_for_empty() {
        expect_all(Vec::<i32>::new()).to_not_have_duplicates();
        expect_all([1, 2, 3]).to_not_have_duplicates();
    }

    #[test]
    #[should_panic(expected = "appear more than once")]
    fn test_duplicates_detected() {
        expect_all([1, 2, 1, 3, 2]).to_not_have_duplicates();
    }

    #[test]
    fn test_element_comparator_applies_to_containment() {
        expect_all([-1, -2, -3])
            .using_comparator(|a: &i32, b: &i32| a.abs().cmp(&b.abs()))
            .to_contain([2, 3])
            .to_not_have_duplicates();
    }

    #[test]
    fn test_condition_cardinality() {
        let even = Condition::new("even", |n: &i32| n % 2 == 0);
        expect_all([2, 3, 4, 5])
            .to_have_exactly(2, &even)
            .to_have_at_least(1, &even)
            .to_have_at_most(2, &even)
            .to_have_any(&even);
        expect_all([2, 4]).to_each_be(&even);
        expect_all([1, 3]).to_have_none(&even);
        expect_all(Vec::<i32>::new()).to_each_be(&even).to_have_none(&even);
    }

    #[test]
    fn test_navigation() {
        expect_all([10, 20, 30]).element_at(at_index(1)).to_equal(20);
        expect_all([10, 20, 30]).first().to_equal(10);
        expect_all([10, 20, 30]).last().to_equal(30);
    }

    #[test]
    #[should_panic(expected = "index 5 is out of bounds")]
    fn test_element_at_bounds() {
        expect_all([10]).element_at(at_index(5));
    }

    #[test]
    fn test_functional_extraction_preserves_order() {
        expect_all(hobbits())
            .extracting(|h| h.age)
            .to_contain_exactly([33, 38, 28]);
    }

    #[test]
    fn test_try_extracting_ok_path() {
        expect_all(["1", "2", "3"])
            .try_extracting(|s| s.parse::<i32>())
            .to_contain_exactly([1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "extraction failed: extractor failed on element at index 1")]
    fn test_try_extracting_wraps_error() {
        expect_all(["1", "x", "3"]).try_extracting(|s| s.parse::<i32>());
    }

    #[test]
    fn test_path_extraction() {
        expect_all(hobbits())
            .extracting_path("name")
            .to_contain_exactly([json!("Frodo"), json!("Sam"), json!("Pippin")]);
    }

    #[test]
    fn test_path_extraction_null_member_yields_null() {
        expect_all(hobbits())
            .extracting_path("nickname")
            .to_contain_at(json!(null), at_index(1));
    }

    #[test]
    #[should_panic(expected = "introspection error: no member 'height'")]
    fn test_path_extraction_missing_member() {
        expect_all(hobbits()).extracting_path("height");
    }

    #[test]
    fn test_multi_path_extraction_produces_rows() {
        expect_all(hobbits())
            .extracting_paths(&["name", "age"])
            .to_contain_at(vec![json!("Sam"), json!(38)], at_index(1));
    }

    #[test]
    fn test_filtered_on_preserves_relative_order() {
        expect_all([1, 2, 3, 4, 5, 6])
            .filtered(|n| n % 2 == 0)
            .to_contain_exactly([2, 4, 6]);
    }

    #[test]
    fn test_filtered_on_property() {
        expect_all(hobbits())
            .filtered_on("age", 33)
            .extracting(|h| h.name.clone())
            .to_contain_exactly(["Frodo".to_string()]);
    }

    #[test]
    fn test_filtered_on_null_is_distinct() {
        expect_all(hobbits())
            .filtered_on_null("nickname")
            .extracting(|h| h.name.clone())
            .to_contain_exactly(["Sam".to_string()]);
    }

    #[test]
    #[should_panic(expected = "invalid argument: filter value must not be null")]
    fn test_filtered_on_rejects_null_value() {
        expect_all(hobbits()).filtered_on("nickname", serde_json::Value::Null);
    }

    #[test]
    #[should_panic(expected = "invalid argument: filter path must not be empty")]
    fn test_filtered_on_rejects_empty_path() {
        expect_all(hobbits()).filtered_on("", 33);
    }

    #[test]
    fn test_filtered_on_condition() {
        let young = Condition::new("young", |h: &Hobbit| h.age < 35);
        expect_all(hobbits())
            .filtered_on_condition(&young)
            .to_have_size(2);
    }

    #[test]
    fn test_size_family() {
        expect_all([1, 2, 3]).to_have_size(3).to_not_be_empty();
        expect_all(Vec::<i32>::new()).to_be_empty();
    }

    #[test]
    fn test_ranges_and_iterators_are_sequences() {
        expect_all(1..=5).to_have_size(5).to_be_sorted();
        expect_all("a b c".split(' ')).to_contain_exactly(["a", "b", "c"]);
    }
}
