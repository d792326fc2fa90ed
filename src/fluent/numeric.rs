//! Numeric verifications: signs, parity, and float tolerance.
//!
//! Integer methods are generated per primitive type; float methods add the
//! offset-based closeness check. Equality and ordering for all numeric
//! subjects come from the generic verifications in `builder`.

use crate::report::{self, AssertionResult};

use super::builder::Expectation;

/// A symmetric tolerance for float comparison, built with [`offset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset(pub(crate) f64);

/// Build a tolerance for [`to_be_close_to`](Expectation::to_be_close_to).
///
/// The boundary is inclusive: a difference exactly equal to the offset
/// passes.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{expect, offset};
///
/// expect(8.1).to_be_close_to(8.0, offset(0.1));
/// ```
///
/// # Panics
///
/// Panics if `value` is negative or NaN (usage error).
pub fn offset(value: f64) -> Offset {
    if value.is_nan() || value < 0.0 {
        report::invalid_argument(format!("offset must be a non-negative number, got {}", value));
    }
    Offset(value)
}

macro_rules! int_expectations {
    ($($t:ident)*) => {$(
        impl Expectation<$t> {
            /// Assert the subject is zero.
            pub fn to_be_zero(self) -> Self {
                let result = if self.subject == 0 {
                    AssertionResult::pass("value to be zero")
                } else {
                    AssertionResult::fail("value to be zero", format!("was {}", self.subject))
                };
                self.verify(result)
            }

            /// Assert the subject is not zero.
            pub fn to_be_nonzero(self) -> Self {
                let result = if self.subject != 0 {
                    AssertionResult::pass("value to be nonzero")
                } else {
                    AssertionResult::fail("value to be nonzero", "was zero".to_string())
                };
                self.verify(result)
            }

            /// Assert the subject is even.
            pub fn to_be_even(self) -> Self {
                let result = if self.subject % 2 == 0 {
                    AssertionResult::pass("value to be even")
                } else {
                    AssertionResult::fail("value to be even", format!("was {}", self.subject))
                };
                self.verify(result)
            }

            /// Assert the subject is odd.
            pub fn to_be_odd(self) -> Self {
                let result = if self.subject % 2 != 0 {
                    AssertionResult::pass("value to be odd")
                } else {
                    AssertionResult::fail("value to be odd", format!("was {}", self.subject))
                };
                self.verify(result)
            }
        }
    )*};
}

macro_rules! signed_int_expectations {
    ($($t:ident)*) => {$(
        impl Expectation<$t> {
            /// Assert the subject is strictly positive.
            pub fn to_be_positive(self) -> Self {
                let result = if self.subject > 0 {
                    AssertionResult::pass("value to be positive")
                } else {
                    AssertionResult::fail("value to be positive", format!("was {}", self.subject))
                };
                self.verify(result)
            }

            /// Assert the subject is strictly negative.
            pub fn to_be_negative(self) -> Self {
                let result = if self.subject < 0 {
                    AssertionResult::pass("value to be negative")
                } else {
                    AssertionResult::fail("value to be negative", format!("was {}", self.subject))
                };
                self.verify(result)
            }
        }
    )*};
}

int_expectations!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);
signed_int_expectations!(i8 i16 i32 i64 i128 isize);

macro_rules! float_expectations {
    ($($t:ident)*) => {$(
        impl Expectation<$t> {
            /// Assert the subject is within `offset` of the expected value,
            /// boundary included: |subject - expected| <= offset passes.
            ///
            /// # Example
            ///
            /// ```rust,ignore
            /// expect(8.1).to_be_close_to(8.0, offset(0.1));
            /// ```
            pub fn to_be_close_to(self, expected: $t, offset: Offset) -> Self {
                let difference = (self.subject as f64 - expected as f64).abs();
                let description = format!(
                    "value to be close to {} within an offset of {}",
                    expected, offset.0
                );
                let result = if difference <= offset.0 {
                    AssertionResult::pass(description)
                } else {
                    AssertionResult::fail(
                        description,
                        format!("was {} (difference {})", self.subject, difference),
                    )
                };
                self.verify(result)
            }

            /// Assert the subject is NaN.
            pub fn to_be_nan(self) -> Self {
                let result = if self.subject.is_nan() {
                    AssertionResult::pass("value to be NaN")
                } else {
                    AssertionResult::fail("value to be NaN", format!("was {}", self.subject))
                };
                self.verify(result)
            }

            /// Assert the subject is neither infinite nor NaN.
            pub fn to_be_finite(self) -> Self {
                let result = if self.subject.is_finite() {
                    AssertionResult::pass("value to be finite")
                } else {
                    AssertionResult::fail("value to be finite", format!("was {}", self.subject))
                };
                self.verify(result)
            }

            /// Assert the subject is zero (either sign).
            pub fn to_be_zero(self) -> Self {
                let result = if self.subject == 0.0 {
                    AssertionResult::pass("value to be zero")
                } else {
                    AssertionResult::fail("value to be zero", format!("was {}", self.subject))
                };
                self.verify(result)
            }

            /// Assert the subject is strictly positive.
            pub fn to_be_positive(self) -> Self {
                let result = if self.subject > 0.0 {
                    AssertionResult::pass("value to be positive")
                } else {
                    AssertionResult::fail("value to be positive", format!("was {}", self.subject))
                };
                self.verify(result)
            }

            /// Assert the subject is strictly negative.
            pub fn to_be_negative(self) -> Self {
                let result = if self.subject < 0.0 {
                    AssertionResult::pass("value to be negative")
                } else {
                    AssertionResult::fail("value to be negative", format!("was {}", self.subject))
                };
                self.verify(result)
            }
        }
    )*};
}

float_expectations!(f32 f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::builder::expect;
    use proptest::prelude::*;

    #[test]
    fn test_int_signs_and_parity() {
        expect(4i32).to_be_positive().to_be_even().to_be_nonzero();
        expect(-3i64).to_be_negative().to_be_odd();
        expect(0u8).to_be_zero().to_be_even();
    }

    #[test]
    #[should_panic(expected = "expected value to be positive")]
    fn test_zero_is_not_positive() {
        expect(0i32).to_be_positive();
    }

    #[test]
    fn test_close_to_boundary_is_inclusive() {
        expect(8.1f64).to_be_close_to(8.0, offset(0.1));
        expect(7.9f64).to_be_close_to(8.0, offset(0.1));
    }

    #[test]
    #[should_panic(expected = "expected value to be close to 8 within an offset of 0.1")]
    fn test_close_to_rejects_past_boundary() {
        expect(8.2f64).to_be_close_to(8.0, offset(0.1));
    }

    #[test]
    #[should_panic(expected = "invalid argument: offset must be a non-negative number")]
    fn test_negative_offset_is_a_usage_error() {
        let _ = offset(-0.5);
    }

    #[test]
    fn test_zero_offset_means_exact_equality() {
        expect(1.5f64).to_be_close_to(1.5, offset(0.0));
    }

    #[test]
    fn test_float_classification() {
        expect(f64::NAN).to_be_nan();
        expect(1.5f64).to_be_finite();
        expect(0.0f64).to_be_zero();
        expect(-0.0f64).to_be_zero();
    }

    #[test]
    #[should_panic(expected = "expected value to be finite")]
    fn test_infinity_is_not_finite() {
        expect(f64::INFINITY).to_be_finite();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Closeness is symmetric: if a is close to b within d, b is close
        /// to a within d.
        #[test]
        fn close_to_is_symmetric(
            a in -1.0e6f64..1.0e6,
            b in -1.0e6f64..1.0e6,
            d in 0.0f64..1.0e6,
        ) {
            let forward = (a - b).abs() <= d;
            let backward = (b - a).abs() <= d;
            prop_assert_eq!(forward, backward);
            if forward {
                expect(a).to_be_close_to(b, offset(d));
                expect(b).to_be_close_to(a, offset(d));
            }
        }

        /// A value is always close to itself for any tolerance.
        #[test]
        fn close_to_is_reflexive(a in -1.0e6f64..1.0e6, d in 0.0f64..1.0e6) {
            expect(a).to_be_close_to(a, offset(d));
        }
    }
}
