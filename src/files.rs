//! File-content loading for test convenience.
//!
//! One helper: read a file fully into a `String`, surfacing a dedicated
//! error when the read or the decoding fails. Nothing is retried.

use std::fs;
use std::path::Path;

/// Error type for content loading.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not valid UTF-8: {source}")]
    Decode {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Read the entire content of a file as UTF-8.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{expect, files::content_of, StrExpectations};
///
/// let content = content_of("fixtures/greeting.txt").unwrap();
/// expect(content).to_contain("hello");
/// ```
pub fn content_of(path: impl AsRef<Path>) -> Result<String, ContentError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| ContentError::Decode {
        path: path.display().to_string(),
        source,
    })
}
