//! Fluent wrapper for map subjects.
//!
//! `expect_map` accepts anything that iterates as key-value pairs, which
//! covers `HashMap`, `BTreeMap` and third-party maps alike. Pairs are kept
//! in source iteration order, so failure messages for ordered maps read in
//! map order.

use std::fmt::Debug;

use crate::compare::Comparison;
use crate::report::{self, AssertionResult, Report};

use super::seq::SeqExpectation;

/// A key-value pair argument, built with [`entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

/// Build a key-value pair for [`to_contain`](MapExpectation::to_contain).
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{expect_map, entry};
///
/// expect_map(ages).to_contain([entry("Frodo", 33), entry("Sam", 38)]);
/// ```
pub fn entry<K, V>(key: K, value: V) -> Entry<K, V> {
    Entry { key, value }
}

/// Create an expectation on the entries of a map.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::expect_map;
/// use std::collections::BTreeMap;
///
/// let ages = BTreeMap::from([("Frodo", 33), ("Sam", 38)]);
/// expect_map(ages).to_contain_key("Frodo").to_have_size(2);
/// ```
#[track_caller]
pub fn expect_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> MapExpectation<K, V> {
    MapExpectation {
        pairs: map.into_iter().collect(),
        report: Report::here(),
    }
}

/// Fluent wrapper over the entries of a map.
///
/// Created by [`expect_map`]. Verifications evaluate immediately and panic
/// on failure.
#[derive(Debug, Clone)]
pub struct MapExpectation<K, V> {
    pub(crate) pairs: Vec<(K, V)>,
    pub(crate) report: Report,
}

impl<K, V> MapExpectation<K, V> {
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

    /// Assert the map has exactly `size` entries.
    pub fn to_have_size(self, size: usize) -> Self
    where
        K: Debug,
        V: Debug,
    {
        let actual = self.pairs.len();
        let result = if actual == size {
            AssertionResult::pass(format!("map to have size {}", size))
        } else {
            AssertionResult::fail(
                format!("map to have size {}", size),
                format!("had size {}", actual),
            )
        };
        self.verify(result)
    }

    /// Assert the map has no entries.
    pub fn to_be_empty(self) -> Self
    where
        K: Debug,
        V: Debug,
    {
        let actual = self.pairs.len();
        let result = if actual == 0 {
            AssertionResult::pass("map to be empty")
        } else {
            AssertionResult::fail("map to be empty", format!("had size {}", actual))
        };
        self.verify(result)
    }

    /// Assert the map has at least one entry.
    pub fn to_not_be_empty(self) -> Self
    where
        K: Debug,
        V: Debug,
    {
        let result = if self.pairs.is_empty() {
            AssertionResult::fail("map to not be empty", "the map was empty".to_string())
        } else {
            AssertionResult::pass("map to not be empty")
        };
        self.verify(result)
    }

    /// Assert the map contains the given key.
    pub fn to_contain_key(self, key: K) -> Self
    where
        K: Debug + PartialEq,
        V: Debug,
    {
        let found = self.pairs.iter().any(|(k, _)| *k == key);
        let result = if found {
            AssertionResult::pass(format!("map to contain key {:?}", key))
        } else {
            AssertionResult::fail(
                format!("map to contain key {:?}", key),
                format!("{:?} was not found", key),
            )
        };
        self.verify(result)
    }

    /// Assert the map contains every given key.
    pub fn to_contain_keys(self, keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Debug + PartialEq,
        V: Debug,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        if keys.is_empty() {
            report::invalid_argument("keys to look for must not be empty");
        }
        let missing: Vec<&K> = keys
            .iter()
            .filter(|key| !self.pairs.iter().any(|(k, _)| k == *key))
            .collect();
        let result = if missing.is_empty() {
            AssertionResult::pass(format!("map to contain keys {:?}", keys))
        } else {
            AssertionResult::fail(
                format!("map to contain keys {:?}", keys),
                format!("{:?} not found", missing),
            )
        };
        self.verify(result)
    }

    /// Assert the map does not contain the given key.
    pub fn to_not_contain_key(self, key: K) -> Self
    where
        K: Debug + PartialEq,
        V: Debug,
    {
        let found = self.pairs.iter().any(|(k, _)| *k == key);
        let result = if found {
            AssertionResult::fail(
                format!("map to not contain key {:?}", key),
                format!("{:?} was found", key),
            )
        } else {
            AssertionResult::pass(format!("map to not contain key {:?}", key))
        };
        self.verify(result)
    }

    /// Assert some entry has the given value.
    pub fn to_contain_value(self, value: V) -> Self
    where
        K: Debug,
        V: Debug + PartialEq,
    {
        let found = self.pairs.iter().any(|(_, v)| *v == value);
        let result = if found {
            AssertionResult::pass(format!("map to contain value {:?}", value))
        } else {
            AssertionResult::fail(
                format!("map to contain value {:?}", value),
                format!("{:?} was not found", value),
            )
        };
        self.verify(result)
    }

    /// Assert the map contains every given entry, key and value both.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect_map(ages).to_contain([entry("Frodo", 33)]);
    /// ```
    pub fn to_contain(self, entries: impl IntoIterator<Item = Entry<K, V>>) -> Self
    where
        K: Debug + PartialEq,
        V: Debug + PartialEq,
    {
        let entries: Vec<Entry<K, V>> = entries.into_iter().collect();
        if entries.is_empty() {
            report::invalid_argument("entries to look for must not be empty");
        }
        let missing: Vec<&Entry<K, V>> = entries
            .iter()
            .filter(|e| !self.pairs.iter().any(|(k, v)| *k == e.key && *v == e.value))
            .collect();
        let result = if missing.is_empty() {
            AssertionResult::pass(format!("map to contain entries {:?}", entries))
        } else {
            AssertionResult::fail(
                format!("map to contain entries {:?}", entries),
                format!("{:?} not found", missing),
            )
        };
        self.verify(result)
    }

    /// Assert the map contains none of the given entries.
    pub fn to_not_contain(self, entries: impl IntoIterator<Item = Entry<K, V>>) -> Self
    where
        K: Debug + PartialEq,
        V: Debug + PartialEq,
    {
        let entries: Vec<Entry<K, V>> = entries.into_iter().collect();
        if entries.is_empty() {
            report::invalid_argument("entries to look for must not be empty");
        }
        let found: Vec<&Entry<K, V>> = entries
            .iter()
            .filter(|e| self.pairs.iter().any(|(k, v)| *k == e.key && *v == e.value))
            .collect();
        let result = if found.is_empty() {
            AssertionResult::pass(format!("map to not contain entries {:?}", entries))
        } else {
            AssertionResult::fail(
                format!("map to not contain entries {:?}", entries),
                format!("{:?} found", found),
            )
        };
        self.verify(result)
    }

    /// Navigate to the keys, in map iteration order.
    pub fn keys(self) -> SeqExpectation<K> {
        SeqExpectation {
            elements: self.pairs.into_iter().map(|(k, _)| k).collect(),
            report: self.report.child(),
            comparison: Comparison::Natural,
        }
    }

    /// Navigate to the values, in map iteration order.
    pub fn values(self) -> SeqExpectation<V> {
        SeqExpectation {
            elements: self.pairs.into_iter().map(|(_, v)| v).collect(),
            report: self.report.child(),
            comparison: Comparison::Natural,
        }
    }

    fn format_pairs(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        if self.pairs.is_empty() {
            return "  entries: (none)\n".to_string();
        }
        let mut output = format!("  entries ({}):\n", self.pairs.len());
        for (i, (k, v)) in self.pairs.iter().take(10).enumerate() {
            output.push_str(&format!(
                "    {}. {}\n",
                i + 1,
                report::preview(&format!("{:?} => {:?}", k, v), 60)
            ));
        }
        if self.pairs.len() > 10 {
            output.push_str(&format!("    ... {} more\n", self.pairs.len() - 10));
        }
        output
    }

    fn verify(self, result: AssertionResult) -> Self
    where
        K: Debug,
        V: Debug,
    {
        if result.passed {
            return self;
        }
        let rendering = self.format_pairs();
        self.report.raise(&result, &rendering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    fn ages() -> BTreeMap<&'static str, u32> {
        BTreeMap::from([("Frodo", 33), ("Pippin", 28), ("Sam", 38)])
    }

    #[test]
    fn test_keys_and_values() {
        expect_map(ages())
            .to_contain_key("Frodo")
            .to_contain_keys(["Sam", "Pippin"])
            .to_not_contain_key("Sauron")
            .to_contain_value(38);
    }

    #[test]
    #[should_panic(expected = "expected map to contain key \"Sauron\"")]
    fn test_missing_key_fails() {
        expect_map(ages()).to_contain_key("Sauron");
    }

    #[test]
    fn test_contains_entries() {
        expect_map(ages())
            .to_contain([entry("Frodo", 33), entry("Sam", 38)])
            .to_not_contain([entry("Frodo", 99)]);
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn test_entry_with_wrong_value_fails() {
        expect_map(ages()).to_contain([entry("Frodo", 99)]);
    }

    #[test]
    fn test_size_family() {
        expect_map(ages()).to_have_size(3).to_not_be_empty();
        expect_map(HashMap::<String, u32>::new()).to_be_empty();
    }

    #[test]
    fn test_keys_navigation_is_ordered_for_ordered_maps() {
        expect_map(ages())
            .keys()
            .to_contain_exactly(["Frodo", "Pippin", "Sam"])
            .to_be_sorted();
    }

    #[test]
    fn test_values_navigation() {
        expect_map(ages()).values().to_contain([33, 38]);
    }

    #[test]
    fn test_hash_maps_work_unordered() {
        let scores: HashMap<&str, i32> = HashMap::from([("a", 1), ("b", 2)]);
        expect_map(scores)
            .to_have_size(2)
            .to_contain([entry("a", 1), entry("b", 2)]);
    }
}
