//! Named, composable predicates for `to_be`/`to_have` style verifications.
//!
//! A `Condition` pairs a predicate with a human-readable name so failure
//! messages can say what was being checked. Conditions compose with
//! `and`, `or` and `negate`, and are immutable once constructed.

use std::rc::Rc;

/// A named boolean predicate over a subject type.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{expect, Condition};
///
/// let even = Condition::new("an even number", |n: &i64| n % 2 == 0);
/// let small = Condition::new("a small number", |n: &i64| n.abs() < 100);
///
/// expect(42i64).to_be(&even.clone().and(small));
/// ```
pub struct Condition<T> {
    name: String,
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T> Clone for Condition<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<T> std::fmt::Debug for Condition<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}

impl<T> Condition<T> {
    /// Create a condition from a name and a predicate.
    pub fn new(name: impl Into<String>, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            name: name.into(),
            predicate: Rc::new(predicate),
        }
    }

    /// The condition's name, as used in failure messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the condition against a subject.
    pub fn matches(&self, subject: &T) -> bool {
        (self.predicate)(subject)
    }
}

impl<T: 'static> Condition<T> {
    /// Both conditions must hold.
    pub fn and(self, other: Condition<T>) -> Condition<T> {
        let name = format!("({} and {})", self.name, other.name);
        Condition {
            name,
            predicate: Rc::new(move |subject| self.matches(subject) && other.matches(subject)),
        }
    }

    /// Either condition must hold.
    pub fn or(self, other: Condition<T>) -> Condition<T> {
        let name = format!("({} or {})", self.name, other.name);
        Condition {
            name,
            predicate: Rc::new(move |subject| self.matches(subject) || other.matches(subject)),
        }
    }

    /// The condition must not hold.
    pub fn negate(self) -> Condition<T> {
        let name = format!("not {}", self.name);
        Condition {
            name,
            predicate: Rc::new(move |subject| !self.matches(subject)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even() -> Condition<i64> {
        Condition::new("an even number", |n: &i64| n % 2 == 0)
    }

    fn positive() -> Condition<i64> {
        Condition::new("a positive number", |n: &i64| *n > 0)
    }

    #[test]
    fn test_matches() {
        assert!(even().matches(&4));
        assert!(!even().matches(&3));
    }

    #[test]
    fn test_and_requires_both() {
        let both = even().and(positive());
        assert!(both.matches(&4));
        assert!(!both.matches(&-4));
        assert!(!both.matches(&3));
        assert_eq!(both.name(), "(an even number and a positive number)");
    }

    #[test]
    fn test_or_requires_either() {
        let either = even().or(positive());
        assert!(either.matches(&-4));
        assert!(either.matches(&3));
        assert!(!either.matches(&-3));
    }

    #[test]
    fn test_negate_flips() {
        let odd = even().negate();
        assert!(odd.matches(&3));
        assert!(!odd.matches(&4));
        assert_eq!(odd.name(), "not an even number");
    }
}
