//! Failure reporting for the fluent assertion API.
//!
//! Every verification in the crate funnels through this module:
//! - `AssertionResult` - the outcome of evaluating a single verification
//! - `Report` - the per-chain context (description, message override, call site)
//! - the raise helpers for the non-assertion error kinds (`invalid argument`,
//!   `introspection error`)
//!
//! Failed verifications panic, which aborts the rest of the chain and the
//! enclosing test. The panic message always starts with `assertion failed:`
//! so the three error kinds stay distinguishable in test output.

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of evaluating an assertion.
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Whether the assertion passed.
    pub passed: bool,
    /// Description of what was asserted.
    pub description: String,
    /// Failure reason if the assertion failed.
    pub reason: Option<String>,
}

impl AssertionResult {
    /// Create a passing assertion result.
    pub(crate) fn pass(description: impl Into<String>) -> Self {
        Self {
            passed: true,
            description: description.into(),
            reason: None,
        }
    }

    /// Create a failing assertion result.
    pub(crate) fn fail(description: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            description: description.into(),
            reason: Some(reason.into()),
        }
    }
}

/// Whether failure messages include the `at: file:line:column` of the
/// assertion call site. On by default.
static INCLUDE_LOCATIONS: AtomicBool = AtomicBool::new(true);

/// Toggle call-site reporting in failure messages, process-wide.
///
/// The crate never exposes its own internal frames: the location printed is
/// the one captured at the `expect*` call via `#[track_caller]`. Disabling
/// this strips that line for tools that render their own locations.
///
/// Intended to be set once at suite start; test execution is assumed
/// single-threaded per process.
pub fn set_include_locations(enabled: bool) {
    INCLUDE_LOCATIONS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn include_locations() -> bool {
    INCLUDE_LOCATIONS.load(Ordering::Relaxed)
}

/// Per-chain reporting context carried by every wrapper.
///
/// Holds the optional chain description (`described_as`), the optional
/// full message override (`with_message`) and the call site captured when
/// the wrapper was created.
#[derive(Debug, Clone)]
pub(crate) struct Report {
    pub(crate) description: Option<String>,
    pub(crate) override_message: Option<String>,
    pub(crate) location: &'static Location<'static>,
}

impl Report {
    /// Capture a new report at the caller's source location.
    #[track_caller]
    pub(crate) fn here() -> Self {
        Self {
            description: None,
            override_message: None,
            location: Location::caller(),
        }
    }

    /// Context for a wrapper derived mid-chain (extraction, filtering,
    /// navigation). The description and override carry forward.
    pub(crate) fn child(&self) -> Self {
        self.clone()
    }

    /// Raise the failure signal for a failed verification.
    ///
    /// `subject_lines` is the pre-formatted rendering of the subject
    /// (indented, newline-terminated); it is skipped when the caller
    /// installed a message override.
    pub(crate) fn raise(&self, result: &AssertionResult, subject_lines: &str) -> ! {
        let mut message = match &self.override_message {
            Some(overridden) => format!("assertion failed: {}\n", overridden),
            None => {
                let reason = result.reason.as_deref().unwrap_or("unknown reason");
                let header = match &self.description {
                    Some(label) => {
                        format!("assertion failed: [{}] expected {}", label, result.description)
                    }
                    None => format!("assertion failed: expected {}", result.description),
                };
                format!("{}\n\n  reason: {}\n{}", header, reason, subject_lines)
            }
        };
        if include_locations() {
            message.push_str(&format!(
                "  at: {}:{}:{}\n",
                self.location.file(),
                self.location.line(),
                self.location.column()
            ));
        }
        panic!("{}", message);
    }
}

/// Raise a usage error: the call shape is wrong, independent of the subject.
pub(crate) fn invalid_argument(reason: impl AsRef<str>) -> ! {
    panic!("invalid argument: {}", reason.as_ref());
}

/// Raise an introspection error: a named property path did not resolve.
pub(crate) fn introspection_error(reason: impl AsRef<str>) -> ! {
    panic!("introspection error: {}", reason.as_ref());
}

/// Raise the failure signal for a fallible extractor that returned an
/// error. The source error's rendering is carried in the message.
pub(crate) fn extraction_failure(reason: impl AsRef<str>) -> ! {
    panic!("extraction failed: {}", reason.as_ref());
}

/// Truncate a rendering to `max` characters, on a character boundary.
pub(crate) fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
