//! Comparison strategies for assertion chains.
//!
//! Every equality and ordering verification consults the wrapper's active
//! `Comparison`: either the subject type's natural `PartialEq`/`PartialOrd`,
//! or a caller-supplied comparator installed with `using_comparator`. Once
//! installed, the comparator stays in effect for the rest of the chain until
//! `using_default_comparator` resets it.

use std::cmp::Ordering;
use std::rc::Rc;

/// The equality/ordering logic in effect for a wrapper.
pub enum Comparison<T> {
    /// Delegate to the subject type's own `PartialEq`/`PartialOrd`.
    Natural,
    /// A caller-supplied comparator, with an optional label used in
    /// failure messages.
    Custom {
        cmp: Rc<dyn Fn(&T, &T) -> Ordering>,
        label: Option<String>,
    },
}

impl<T> Clone for Comparison<T> {
    fn clone(&self) -> Self {
        match self {
            Comparison::Natural => Comparison::Natural,
            Comparison::Custom { cmp, label } => Comparison::Custom {
                cmp: Rc::clone(cmp),
                label: label.clone(),
            },
        }
    }
}

impl<T> std::fmt::Debug for Comparison<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Natural => write!(f, "Natural"),
            Comparison::Custom { label, .. } => write!(f, "Custom({:?})", label),
        }
    }
}

impl<T> Comparison<T> {
    pub(crate) fn custom(cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        Comparison::Custom {
            cmp: Rc::new(cmp),
            label: None,
        }
    }

    pub(crate) fn custom_named(
        cmp: impl Fn(&T, &T) -> Ordering + 'static,
        label: impl Into<String>,
    ) -> Self {
        Comparison::Custom {
            cmp: Rc::new(cmp),
            label: Some(label.into()),
        }
    }

    /// Equality under the active strategy.
    pub(crate) fn eq(&self, a: &T, b: &T) -> bool
    where
        T: PartialEq,
    {
        match self {
            Comparison::Natural => a == b,
            Comparison::Custom { cmp, .. } => cmp(a, b) == Ordering::Equal,
        }
    }

    /// Ordering under the active strategy. `None` means the two values are
    /// not comparable naturally (e.g. NaN).
    pub(crate) fn try_order(&self, a: &T, b: &T) -> Option<Ordering>
    where
        T: PartialOrd,
    {
        match self {
            Comparison::Natural => a.partial_cmp(b),
            Comparison::Custom { cmp, .. } => Some(cmp(a, b)),
        }
    }

    /// Suffix appended to failure descriptions when a custom comparator is
    /// in effect, e.g. `" (using case-insensitive order)"`.
    pub(crate) fn describe(&self) -> String {
        match self {
            Comparison::Natural => String::new(),
            Comparison::Custom { label: Some(l), .. } => format!(" (using {})", l),
            Comparison::Custom { label: None, .. } => " (using custom comparator)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_equality() {
        let cmp: Comparison<i32> = Comparison::Natural;
        assert!(cmp.eq(&1, &1));
        assert!(!cmp.eq(&1, &2));
    }

    #[test]
    fn test_custom_equality_overrides_natural() {
        // Compare by absolute value.
        let cmp = Comparison::custom(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
        assert!(cmp.eq(&-3, &3));
        assert!(!cmp.eq(&-3, &4));
    }

    #[test]
    fn test_natural_order_is_partial() {
        let cmp: Comparison<f64> = Comparison::Natural;
        assert_eq!(cmp.try_order(&1.0, &2.0), Some(Ordering::Less));
        assert_eq!(cmp.try_order(&f64::NAN, &2.0), None);
    }

    #[test]
    fn test_custom_order_is_total() {
        let cmp = Comparison::custom(|a: &f64, b: &f64| a.total_cmp(b));
        assert_eq!(cmp.try_order(&f64::NAN, &2.0), Some(Ordering::Greater));
    }

    #[test]
    fn test_describe_mentions_label() {
        let cmp = Comparison::custom_named(|a: &i32, b: &i32| a.cmp(b), "reverse order");
        assert_eq!(cmp.describe(), " (using reverse order)");
        let unnamed = Comparison::custom(|a: &i32, b: &i32| a.cmp(b));
        assert_eq!(unnamed.describe(), " (using custom comparator)");
        let natural: Comparison<i32> = Comparison::Natural;
        assert_eq!(natural.describe(), "");
    }
}
