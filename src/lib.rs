//! # affirm
//!
//! A fluent assertion library for unit tests: chainable expectations with
//! readable failure messages.
//!
//! Works with Rust's native `#[test]` framework; a failed verification
//! panics with a message that names what was expected, what was found and
//! where the assertion sits.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use affirm::{expect, expect_all, StrExpectations};
//!
//! #[test]
//! fn test_fellowship() {
//!     expect("Frodo").to_start_with("Fro").to_contain("odo");
//!
//!     expect_all(["Frodo", "Sam", "Pippin"])
//!         .to_have_size(3)
//!         .to_contain(["Sam"])
//!         .to_not_contain(["Sauron"]);
//! }
//! ```
//!
//! ## Descriptions and custom comparators
//!
//! ```rust,ignore
//! use affirm::expect;
//!
//! expect(frodo.age)
//!     .described_as("Frodo's age")
//!     .to_equal(33);
//!
//! expect(-3)
//!     .using_comparator_named(|a: &i32, b: &i32| a.abs().cmp(&b.abs()), "absolute value")
//!     .to_equal(3);
//! ```
//!
//! ## Extraction and filtering
//!
//! ```rust,ignore
//! use affirm::expect_all;
//!
//! expect_all(hobbits)
//!     .filtered_on("age", 33)
//!     .extracting_path("name.first")
//!     .to_contain([serde_json::json!("Frodo")]);
//! ```

pub mod compare;
pub mod condition;
pub mod files;
pub mod fluent;
pub mod report;

mod extract;

// Entry points
pub use fluent::{expect, expect_all, expect_grouped, expect_map, expect_panic};

// Wrapper types
pub use fluent::{
    Expectation, GroupedExpectation, MapExpectation, PanicExpectation, SeqExpectation,
};

// Category extension traits
pub use fluent::{PathExpectations, StrExpectations};

// Argument types and their constructors
pub use fluent::{at_index, entry, offset, Entry, Index, Offset};

// Conditions and reporting
pub use condition::Condition;
pub use report::{set_include_locations, AssertionResult};

// Content loading
pub use files::{content_of, ContentError};

// Dates (feature-gated)
#[cfg(feature = "chrono")]
pub use fluent::{
    register_date_format, use_default_date_formats, DateArg, DateExpectations, TemporalSubject,
};

// Persistent collections (feature-gated)
#[cfg(feature = "im")]
pub use fluent::{expect_ord_map, expect_vector};
