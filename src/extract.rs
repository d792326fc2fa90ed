//! Named property resolution for extraction and filtering.
//!
//! Elements are serialized to `serde_json::Value` and dotted paths are
//! resolved segment by segment over that form. This is the one narrow
//! "value accessor" capability the extraction and filtering layers build on;
//! everything else in the crate is unaware of how lookup works.
//!
//! Resolution rules:
//! - a missing member on an element is an introspection error
//! - a present member whose value is null resolves to JSON null, and any
//!   deeper segment under a null also resolves to null rather than raising

use serde::Serialize;
use serde_json::Value;

use crate::report;

/// Why a path failed to resolve on a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathError {
    /// The segment is not a member of the value it was looked up on.
    Missing { segment: String },
    /// The value at this point is not a structure, so the segment cannot
    /// be looked up at all.
    NotAStructure { segment: String },
}

impl PathError {
    pub(crate) fn render(&self, path: &str, position: usize) -> String {
        match self {
            PathError::Missing { segment } => format!(
                "no member '{}' while resolving path '{}' on element at index {}",
                segment, path, position
            ),
            PathError::NotAStructure { segment } => format!(
                "cannot look up '{}' while resolving path '{}' on element at index {}: value is not a structure",
                segment, path, position
            ),
        }
    }
}

/// Serialize one element for lookup. A shape serde cannot represent is an
/// introspection error, raised at extraction time.
pub(crate) fn to_value<T: Serialize>(element: &T, position: usize) -> Value {
    match serde_json::to_value(element) {
        Ok(value) => value,
        Err(e) => report::introspection_error(format!(
            "element at index {} could not be inspected: {}",
            position, e
        )),
    }
}

/// Serialize a scalar subject for field-wise comparison.
pub(crate) fn subject_value<T: Serialize>(subject: &T, role: &str) -> Value {
    match serde_json::to_value(subject) {
        Ok(value) => value,
        Err(e) => report::introspection_error(format!("{} could not be inspected: {}", role, e)),
    }
}

/// Resolve a dotted path over a serialized element.
pub(crate) fn resolve_path(value: &Value, path: &str) -> Result<Value, PathError> {
    if path.is_empty() {
        report::invalid_argument("property path must not be empty");
    }
    let mut current = value.clone();
    for segment in path.split('.') {
        if segment.is_empty() {
            report::invalid_argument(format!("property path '{}' has an empty segment", path));
        }
        current = match current {
            // Null propagates: a None field yields null for the rest of
            // the path instead of raising.
            Value::Null => Value::Null,
            Value::Object(mut map) => match map.remove(segment) {
                Some(next) => next,
                None => {
                    return Err(PathError::Missing {
                        segment: segment.to_string(),
                    })
                }
            },
            _ => {
                return Err(PathError::NotAStructure {
                    segment: segment.to_string(),
                })
            }
        };
    }
    Ok(current)
}

/// Resolve a path on an element, raising the introspection error on failure.
pub(crate) fn extract_path<T: Serialize>(element: &T, path: &str, position: usize) -> Value {
    let value = to_value(element, position);
    match resolve_path(&value, path) {
        Ok(found) => found,
        Err(e) => report::introspection_error(e.render(path, position)),
    }
}
