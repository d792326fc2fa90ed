//! Entry points for persistent `im` collections (feature `im`).
//!
//! The generic entries already accept anything iterable; these adapters
//! exist so persistent vectors and ordered maps can be asserted on without
//! spelling out the conversion at every call site.

use crate::fluent::map::MapExpectation;
use crate::fluent::seq::SeqExpectation;

use super::seq::expect_all;

/// Create an expectation on the elements of a persistent vector.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::expect_vector;
/// use im::vector;
///
/// expect_vector(&vector![1, 2, 3]).to_contain([2]).to_be_sorted();
/// ```
#[track_caller]
pub fn expect_vector<T: Clone>(vector: &im::Vector<T>) -> SeqExpectation<T> {
    expect_all(vector.iter().cloned())
}

/// Create an expectation on the entries of a persistent ordered map.
#[track_caller]
pub fn expect_ord_map<K, V>(map: &im::OrdMap<K, V>) -> MapExpectation<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    super::map::expect_map(map.iter().map(|(k, v)| (k.clone(), v.clone())))
}
