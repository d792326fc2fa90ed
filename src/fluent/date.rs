//! Temporal verifications (feature `chrono`).
//!
//! Works on `NaiveDate`, `NaiveDateTime` and `DateTime<Utc>` subjects.
//! Every argument position accepts either a value of the subject's type or
//! a string parsed through a process-wide format registry; an unparseable
//! string is a usage error, not an assertion failure.
//!
//! The registry is global by design: register custom formats once at suite
//! start with [`register_date_format`], reset with
//! [`use_default_date_formats`].

use std::fmt::Debug;
use std::sync::RwLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::report::{self, AssertionResult};

use super::builder::Expectation;

/// Formats tried, in order, when no custom format is registered.
const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d"];

static DATE_FORMATS: RwLock<Vec<String>> = RwLock::new(Vec::new());

/// Register a custom `chrono` format string, tried before the defaults
/// when parsing date arguments. Process-wide; set once at suite start.
pub fn register_date_format(format: impl Into<String>) {
    let mut formats = match DATE_FORMATS.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    formats.insert(0, format.into());
}

/// Drop every registered custom format, restoring the defaults.
pub fn use_default_date_formats() {
    let mut formats = match DATE_FORMATS.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    formats.clear();
}

fn active_formats() -> Vec<String> {
    let registered = match DATE_FORMATS.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let mut formats: Vec<String> = registered.clone();
    formats.extend(DEFAULT_FORMATS.iter().map(|f| f.to_string()));
    formats
}

fn parse_naive_datetime(text: &str, formats: &[String]) -> Option<NaiveDateTime> {
    for format in formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Subject types usable in temporal verifications.
pub trait TemporalSubject: Datelike + PartialOrd + Debug + Sized {
    /// Parse a date argument with the given format strings.
    fn parse_date(text: &str, formats: &[String]) -> Option<Self>;
}

impl TemporalSubject for NaiveDate {
    fn parse_date(text: &str, formats: &[String]) -> Option<Self> {
        parse_naive_datetime(text, formats).map(|dt| dt.date())
    }
}

impl TemporalSubject for NaiveDateTime {
    fn parse_date(text: &str, formats: &[String]) -> Option<Self> {
        parse_naive_datetime(text, formats)
    }
}

impl TemporalSubject for DateTime<Utc> {
    fn parse_date(text: &str, formats: &[String]) -> Option<Self> {
        parse_naive_datetime(text, formats).map(|dt| Utc.from_utc_datetime(&dt))
    }
}

/// A temporal argument: either a value of the subject's type or a string
/// parsed through the format registry.
pub trait DateArg<D> {
    /// Resolve to a concrete date, raising a usage error if a string does
    /// not parse with any registered format.
    fn resolve(self) -> D;
}

macro_rules! typed_date_arg {
    ($($t:ty),*) => {$(
        impl DateArg<$t> for $t {
            fn resolve(self) -> $t {
                self
            }
        }
    )*};
}

typed_date_arg!(NaiveDate, NaiveDateTime, DateTime<Utc>);

impl<D: TemporalSubject> DateArg<D> for &str {
    fn resolve(self) -> D {
        let formats = active_formats();
        match D::parse_date(self, &formats) {
            Some(date) => date,
            None => report::invalid_argument(format!(
                "cannot parse date '{}' with any of the registered formats",
                self
            )),
        }
    }
}

/// Temporal verifications for date and datetime subjects.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{expect, DateExpectations};
/// use chrono::NaiveDate;
///
/// let embarkation = NaiveDate::from_ymd_opt(2018, 9, 22).unwrap();
/// expect(embarkation)
///     .to_be_after("2018-01-01")
///     .to_be_before_or_equal_to("2018-09-22")
///     .to_be_in_same_year_as("2018-12-25");
/// ```
pub trait DateExpectations<D: TemporalSubject>: Sized {
    /// Assert the subject is strictly before the given date.
    fn to_be_before(self, other: impl DateArg<D>) -> Self;
    /// Assert the subject is strictly after the given date.
    fn to_be_after(self, other: impl DateArg<D>) -> Self;
    /// Assert the subject is before or exactly the given date.
    fn to_be_before_or_equal_to(self, other: impl DateArg<D>) -> Self;
    /// Assert the subject is after or exactly the given date.
    fn to_be_after_or_equal_to(self, other: impl DateArg<D>) -> Self;
    /// Assert both dates fall in the same calendar year.
    fn to_be_in_same_year_as(self, other: impl DateArg<D>) -> Self;
    /// Assert both dates fall in the same calendar month of the same year.
    fn to_be_in_same_month_as(self, other: impl DateArg<D>) -> Self;
    /// Assert both dates fall on the same calendar day.
    fn to_be_in_same_day_as(self, other: impl DateArg<D>) -> Self;
}

impl<D: TemporalSubject> DateExpectations<D> for Expectation<D> {
    fn to_be_before(self, other: impl DateArg<D>) -> Self {
        let other = other.resolve();
        let description = format!("date to be before {:?}{}", other, self.comparison.describe());
        let result = match self.comparison.try_order(&self.subject, &other) {
            Some(std::cmp::Ordering::Less) => AssertionResult::pass(description),
            Some(_) => AssertionResult::fail(description, format!("was {:?}", self.subject)),
            None => AssertionResult::fail(description, "dates are not comparable".to_string()),
        };
        self.verify(result)
    }

    fn to_be_after(self, other: impl DateArg<D>) -> Self {
        let other = other.resolve();
        let description = format!("date to be after {:?}{}", other, self.comparison.describe());
        let result = match self.comparison.try_order(&self.subject, &other) {
            Some(std::cmp::Ordering::Greater) => AssertionResult::pass(description),
            Some(_) => AssertionResult::fail(description, format!("was {:?}", self.subject)),
            None => AssertionResult::fail(description, "dates are not comparable".to_string()),
        };
        self.verify(result)
    }

    fn to_be_before_or_equal_to(self, other: impl DateArg<D>) -> Self {
        let other = other.resolve();
        let description = format!(
            "date to be before or equal to {:?}{}",
            other,
            self.comparison.describe()
        );
        let result = match self.comparison.try_order(&self.subject, &other) {
            Some(std::cmp::Ordering::Greater) => {
                AssertionResult::fail(description, format!("was {:?}", self.subject))
            }
            Some(_) => AssertionResult::pass(description),
            None => AssertionResult::fail(description, "dates are not comparable".to_string()),
        };
        self.verify(result)
    }

    fn to_be_after_or_equal_to(self, other: impl DateArg<D>) -> Self {
        let other = other.resolve();
        let description = format!(
            "date to be after or equal to {:?}{}",
            other,
            self.comparison.describe()
        );
        let result = match self.comparison.try_order(&self.subject, &other) {
            Some(std::cmp::Ordering::Less) => {
                AssertionResult::fail(description, format!("was {:?}", self.subject))
            }
            Some(_) => AssertionResult::pass(description),
            None => AssertionResult::fail(description, "dates are not comparable".to_string()),
        };
        self.verify(result)
    }

    fn to_be_in_same_year_as(self, other: impl DateArg<D>) -> Self {
        let other = other.resolve();
        let description = format!("date to be in the same year as {:?}", other);
        let result = if self.subject.year() == other.year() {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("was in year {}", self.subject.year()))
        };
        self.verify(result)
    }

    fn to_be_in_same_month_as(self, other: impl DateArg<D>) -> Self {
        let other = other.resolve();
        let description = format!("date to be in the same month as {:?}", other);
        let same = self.subject.year() == other.year() && self.subject.month() == other.month();
        let result = if same {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(
                description,
                format!(
                    "was in {:04}-{:02}",
                    self.subject.year(),
                    self.subject.month()
                ),
            )
        };
        self.verify(result)
    }

    fn to_be_in_same_day_as(self, other: impl DateArg<D>) -> Self {
        let other = other.resolve();
        let description = format!("date to be on the same day as {:?}", other);
        let same = self.subject.year() == other.year()
            && self.subject.month() == other.month()
            && self.subject.day() == other.day();
        let result = if same {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(
                description,
                format!(
                    "was on {:04}-{:02}-{:02}",
                    self.subject.year(),
                    self.subject.month(),
                    self.subject.day()
                ),
            )
        };
        self.verify(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::builder::expect;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ordering_with_typed_arguments() {
        expect(day(2018, 9, 22))
            .to_be_after(day(2018, 1, 1))
            .to_be_before(day(2019, 1, 1))
            .to_be_before_or_equal_to(day(2018, 9, 22))
            .to_be_after_or_equal_to(day(2018, 9, 22));
    }

    #[test]
    fn test_ordering_with_string_arguments() {
        expect(day(2018, 9, 22))
            .to_be_after("2018-01-01")
            .to_be_before("2019-01-01");
    }

    #[test]
    fn test_same_unit_comparisons() {
        expect(day(2018, 9, 22))
            .to_be_in_same_year_as("2018-12-25")
            .to_be_in_same_month_as("2018-09-01")
            .to_be_in_same_day_as("2018-09-22");
    }

    #[test]
    #[should_panic(expected = "expected date to be before")]
    fn test_equal_dates_are_not_before() {
        expect(day(2018, 9, 22)).to_be_before(day(2018, 9, 22));
    }

    #[test]
    #[should_panic(expected = "invalid argument: cannot parse date '22/09/2018'")]
    fn test_unparseable_string_is_a_usage_error() {
        expect(day(2018, 9, 22)).to_be_before("22/09/2018");
    }

    #[test]
    fn test_datetime_subjects() {
        let earlier = day(2018, 9, 22).and_hms_opt(8, 0, 0).unwrap();
        expect(earlier)
            .to_be_before("2018-09-22T09:30:00")
            .to_be_in_same_day_as("2018-09-22");
    }

    #[test]
    fn test_utc_subjects() {
        let moment = Utc.with_ymd_and_hms(2018, 9, 22, 8, 0, 0).unwrap();
        expect(moment).to_be_after("2018-09-21T23:59:59");
    }

    #[test]
    fn test_between_comes_from_the_generic_chain() {
        expect(day(2018, 9, 22)).to_be_between(day(2018, 1, 1), day(2019, 1, 1));
    }

    #[test]
    fn test_registered_format_takes_precedence() {
        register_date_format("%d/%m/%Y");
        expect(day(2018, 9, 22)).to_be_in_same_day_as("22/09/2018");
        use_default_date_formats();
    }
}
