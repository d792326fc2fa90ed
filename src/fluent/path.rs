//! Filesystem verifications for path subjects.
//!
//! Implemented over any `AsRef<Path>` subject. Content checks read through
//! the crate's content helper, so a read failure surfaces as an assertion
//! failure describing the underlying error.

use std::fmt::Debug;
use std::path::Path;

use crate::files;
use crate::report::AssertionResult;

use super::builder::Expectation;

/// Filesystem verifications for `AsRef<Path>` subjects.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{expect, PathExpectations};
///
/// expect("Cargo.toml")
///     .to_exist()
///     .to_be_a_file()
///     .to_have_extension("toml");
/// ```
pub trait PathExpectations: Sized {
    /// Assert the path exists.
    fn to_exist(self) -> Self;
    /// Assert the path does not exist.
    fn to_not_exist(self) -> Self;
    /// Assert the path exists and is a regular file.
    fn to_be_a_file(self) -> Self;
    /// Assert the path exists and is a directory.
    fn to_be_a_directory(self) -> Self;
    /// Assert the path's extension equals the given one (no leading dot).
    fn to_have_extension(self, extension: &str) -> Self;
    /// Assert the path's final component equals the given name.
    fn to_have_file_name(self, name: &str) -> Self;
    /// Assert the file's entire UTF-8 content equals the given text.
    fn to_have_content(self, content: &str) -> Self;
}

impl<S: AsRef<Path> + Debug> PathExpectations for Expectation<S> {
    fn to_exist(self) -> Self {
        let result = if self.subject.as_ref().exists() {
            AssertionResult::pass("path to exist")
        } else {
            AssertionResult::fail("path to exist", "it does not".to_string())
        };
        self.verify(result)
    }

    fn to_not_exist(self) -> Self {
        let result = if self.subject.as_ref().exists() {
            AssertionResult::fail("path to not exist", "it does".to_string())
        } else {
            AssertionResult::pass("path to not exist")
        };
        self.verify(result)
    }

    fn to_be_a_file(self) -> Self {
        let result = if self.subject.as_ref().is_file() {
            AssertionResult::pass("path to be a file")
        } else {
            AssertionResult::fail(
                "path to be a file",
                "it is not a regular file".to_string(),
            )
        };
        self.verify(result)
    }

    fn to_be_a_directory(self) -> Self {
        let result = if self.subject.as_ref().is_dir() {
            AssertionResult::pass("path to be a directory")
        } else {
            AssertionResult::fail("path to be a directory", "it is not".to_string())
        };
        self.verify(result)
    }

    fn to_have_extension(self, extension: &str) -> Self {
        let actual = self
            .subject
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_string());
        let description = format!("path to have extension {:?}", extension);
        let result = match &actual {
            Some(found) if found == extension => AssertionResult::pass(description),
            Some(found) => {
                AssertionResult::fail(description, format!("extension was {:?}", found))
            }
            None => AssertionResult::fail(description, "it has no extension".to_string()),
        };
        self.verify(result)
    }

    fn to_have_file_name(self, name: &str) -> Self {
        let actual = self
            .subject
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        let description = format!("path to have file name {:?}", name);
        let result = match &actual {
            Some(found) if found == name => AssertionResult::pass(description),
            Some(found) => {
                AssertionResult::fail(description, format!("file name was {:?}", found))
            }
            None => AssertionResult::fail(description, "it has no file name".to_string()),
        };
        self.verify(result)
    }

    fn to_have_content(self, content: &str) -> Self {
        let description = "file content to match the expected text".to_string();
        let result = match files::content_of(self.subject.as_ref()) {
            Ok(actual) if actual == content => AssertionResult::pass(description),
            Ok(actual) => AssertionResult::fail(
                description,
                format!("content had {} bytes and differed", actual.len()),
            ),
            Err(e) => AssertionResult::fail(description, format!("could not load it: {}", e)),
        };
        self.verify(result)
    }
}
