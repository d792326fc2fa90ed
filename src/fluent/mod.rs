//! Fluent assertion API.
//!
//! This module wires together the entry points and the per-category
//! verification modules. Assertions evaluate immediately and panic on
//! failure, aborting the rest of the chain and the enclosing test.
//!
//! # Example
//!
//! ```rust,ignore
//! use affirm::{expect, expect_all, StrExpectations};
//!
//! expect("The Shire").to_contain("Shire");
//! expect_all([1, 2, 3]).to_be_sorted().to_contain([2]);
//! ```

mod builder;
mod error;
mod grouped;
mod map;
mod numeric;
mod option;
mod path;
mod result;
mod seq;
mod str;

#[cfg(feature = "chrono")]
mod date;
#[cfg(feature = "im")]
mod im;
#[cfg(feature = "image")]
mod image;

pub use builder::{expect, Expectation};
pub use error::{expect_panic, PanicExpectation};
pub use grouped::{expect_grouped, GroupedExpectation};
pub use map::{entry, expect_map, Entry, MapExpectation};
pub use numeric::{offset, Offset};
pub use path::PathExpectations;
pub use seq::{at_index, expect_all, Index, SeqExpectation};
pub use self::str::StrExpectations;

#[cfg(feature = "chrono")]
pub use date::{
    register_date_format, use_default_date_formats, DateArg, DateExpectations, TemporalSubject,
};
#[cfg(feature = "im")]
pub use self::im::{expect_ord_map, expect_vector};

#[cfg(test)]
mod tests;
