//! Fluent wrapper for grouped maps (one key, many values).
//!
//! `expect_grouped` accepts any map-like iterable whose values are
//! themselves iterable, e.g. `HashMap<K, Vec<V>>` or a persistent
//! `OrdMap<K, Vector<V>>`. It is the entry point for multi-map shapes.

use std::fmt::Debug;

use crate::compare::Comparison;
use crate::report::{self, AssertionResult, Report};

use super::seq::SeqExpectation;

/// Create an expectation on a grouped map.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::expect_grouped;
/// use std::collections::BTreeMap;
///
/// let teams = BTreeMap::from([
///     ("Lakers", vec!["Kobe", "Magic"]),
///     ("Spurs", vec!["Duncan", "Parker"]),
/// ]);
/// expect_grouped(teams)
///     .to_contain_keys(["Lakers"])
///     .to_contain_entry("Spurs", "Duncan")
///     .to_have_total_size(4);
/// ```
#[track_caller]
pub fn expect_grouped<K, C, V>(groups: impl IntoIterator<Item = (K, C)>) -> GroupedExpectation<K, V>
where
    C: IntoIterator<Item = V>,
{
    GroupedExpectation {
        groups: groups
            .into_iter()
            .map(|(k, c)| (k, c.into_iter().collect()))
            .collect(),
        report: Report::here(),
    }
}

/// Fluent wrapper over a grouped map.
///
/// Created by [`expect_grouped`].
#[derive(Debug, Clone)]
pub struct GroupedExpectation<K, V> {
    pub(crate) groups: Vec<(K, Vec<V>)>,
    pub(crate) report: Report,
}

impl<K, V> GroupedExpectation<K, V> {
    /// Attach a description that prefixes any failure message produced by
    /// this chain.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.report.description = Some(description.into());
        self
    }

    /// Assert the grouped map has no entries at all.
    pub fn to_be_empty(self) -> Self
    where
        K: Debug,
        V: Debug,
    {
        let result = if self.groups.is_empty() {
            AssertionResult::pass("grouped map to be empty")
        } else {
            AssertionResult::fail(
                "grouped map to be empty",
                format!("had {} groups", self.groups.len()),
            )
        };
        self.verify(result)
    }

    /// Assert every given key has a group.
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
            .filter(|key| !self.groups.iter().any(|(k, _)| k == *key))
            .collect();
        let result = if missing.is_empty() {
            AssertionResult::pass(format!("grouped map to contain keys {:?}", keys))
        } else {
            AssertionResult::fail(
                format!("grouped map to contain keys {:?}", keys),
                format!("{:?} not found", missing),
            )
        };
        self.verify(result)
    }

    /// Assert the value appears within the group of the given key.
    pub fn to_contain_entry(self, key: K, value: V) -> Self
    where
        K: Debug + PartialEq,
        V: Debug + PartialEq,
    {
        let description = format!("grouped map to contain {:?} under {:?}", value, key);
        let result = match self.groups.iter().find(|(k, _)| *k == key) {
            None => AssertionResult::fail(description, format!("key {:?} was not found", key)),
            Some((_, members)) if members.contains(&value) => AssertionResult::pass(description),
            Some(_) => AssertionResult::fail(
                description,
                format!("{:?} was not in that group", value),
            ),
        };
        self.verify(result)
    }

    /// Assert every given value appears in some group.
    pub fn to_contain_values(self, values: impl IntoIterator<Item = V>) -> Self
    where
        K: Debug,
        V: Debug + PartialEq,
    {
        let values: Vec<V> = values.into_iter().collect();
        if values.is_empty() {
            report::invalid_argument("values to look for must not be empty");
        }
        let missing: Vec<&V> = values
            .iter()
            .filter(|value| !self.groups.iter().any(|(_, m)| m.contains(value)))
            .collect();
        let result = if missing.is_empty() {
            AssertionResult::pass(format!("grouped map to contain values {:?}", values))
        } else {
            AssertionResult::fail(
                format!("grouped map to contain values {:?}", values),
                format!("{:?} not found", missing),
            )
        };
        self.verify(result)
    }

    /// Assert the total number of values across all groups.
    pub fn to_have_total_size(self, size: usize) -> Self
    where
        K: Debug,
        V: Debug,
    {
        let actual: usize = self.groups.iter().map(|(_, m)| m.len()).sum();
        let result = if actual == size {
            AssertionResult::pass(format!("grouped map to have total size {}", size))
        } else {
            AssertionResult::fail(
                format!("grouped map to have total size {}", size),
                format!("had total size {}", actual),
            )
        };
        self.verify(result)
    }

    /// Assert the group under the given key has exactly `size` values.
    pub fn to_have_group_size(self, key: K, size: usize) -> Self
    where
        K: Debug + PartialEq,
        V: Debug,
    {
        let description = format!("group {:?} to have size {}", key, size);
        let result = match self.groups.iter().find(|(k, _)| *k == key) {
            None => AssertionResult::fail(description, format!("key {:?} was not found", key)),
            Some((_, members)) if members.len() == size => AssertionResult::pass(description),
            Some((_, members)) => {
                AssertionResult::fail(description, format!("had size {}", members.len()))
            }
        };
        self.verify(result)
    }

    /// Navigate to the values of one group, failing if the key is absent.
    pub fn group(mut self, key: K) -> SeqExpectation<V>
    where
        K: Debug + PartialEq,
        V: Debug,
    {
        let position = self.groups.iter().position(|(k, _)| *k == key);
        match position {
            Some(i) => {
                let (_, members) = self.groups.swap_remove(i);
                SeqExpectation {
                    elements: members,
                    report: self.report.child(),
                    comparison: Comparison::Natural,
                }
            }
            None => {
                let result = AssertionResult::fail(
                    format!("grouped map to contain key {:?}", key),
                    format!("{:?} was not found", key),
                );
                let rendering = self.format_groups();
                self.report.raise(&result, &rendering)
            }
        }
    }

    fn format_groups(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        if self.groups.is_empty() {
            return "  groups: (none)\n".to_string();
        }
        let mut output = format!("  groups ({}):\n", self.groups.len());
        for (i, (k, members)) in self.groups.iter().take(10).enumerate() {
            output.push_str(&format!(
                "    {}. {}\n",
                i + 1,
                report::preview(&format!("{:?} => {:?}", k, members), 60)
            ));
        }
        if self.groups.len() > 10 {
            output.push_str(&format!("    ... {} more\n", self.groups.len() - 10));
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
        let rendering = self.format_groups();
        self.report.raise(&result, &rendering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn teams() -> BTreeMap<&'static str, Vec<&'static str>> {
        BTreeMap::from([
            ("Lakers", vec!["Kobe", "Magic"]),
            ("Spurs", vec!["Duncan", "Parker", "Ginobili"]),
        ])
    }

    #[test]
    fn test_keys_entries_and_values() {
        expect_grouped(teams())
            .to_contain_keys(["Lakers", "Spurs"])
            .to_contain_entry("Spurs", "Duncan")
            .to_contain_values(["Kobe", "Parker"]);
    }

    #[test]
    #[should_panic(expected = "\"Duncan\" was not in that group")]
    fn test_entry_in_wrong_group_fails() {
        expect_grouped(teams()).to_contain_entry("Lakers", "Duncan");
    }

    #[test]
    fn test_sizes() {
        expect_grouped(teams())
            .to_have_total_size(5)
            .to_have_group_size("Spurs", 3);
    }

    #[test]
    fn test_group_navigation() {
        expect_grouped(teams())
            .group("Lakers")
            .to_contain_exactly(["Kobe", "Magic"]);
    }

    #[test]
    #[should_panic(expected = "\"Bulls\" was not found")]
    fn test_group_navigation_missing_key() {
        expect_grouped(teams()).group("Bulls");
    }

    #[test]
    fn test_empty_grouped_map() {
        expect_grouped(BTreeMap::<&str, Vec<i32>>::new()).to_be_empty();
    }
}
