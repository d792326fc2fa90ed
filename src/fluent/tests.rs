//! Cross-cutting tests for the fluent assertion API.

use crate::condition::Condition;
use crate::{at_index, entry, expect, expect_all, expect_map, offset};
use crate::{PathExpectations, StrExpectations};

use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Name {
    first: String,
    last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Character {
    name: Option<Name>,
    age: u32,
}

fn characters() -> Vec<Character> {
    vec![
        Character {
            name: Some(Name { first: "Frodo".into(), last: "Baggins".into() }),
            age: 33,
        },
        Character { name: None, age: 800 },
        Character {
            name: Some(Name { first: "Sam".into(), last: "Gamgee".into() }),
            age: 38,
        },
        Character { name: None, age: 800 },
    ]
}

#[test]
fn test_passing_chains_never_panic_and_are_idempotent() {
    // Repeating the same passing verification any number of times is fine.
    expect(42)
        .to_equal(42)
        .to_equal(42)
        .to_equal(42)
        .to_be_greater_than(41)
        .to_be_greater_than(41);
}

#[test]
fn test_failing_verification_mentions_both_values() {
    let failure = std::panic::catch_unwind(|| {
        expect_all(["a", "b", "c"]).to_contain(["z"]);
    })
    .unwrap_err();
    let message = failure.downcast_ref::<String>().unwrap();
    assert!(message.contains("\"z\""));
    assert!(message.contains("\"a\""));
}

#[test]
fn test_comparator_round_trip_behaves_naturally() {
    let by_length = |a: &String, b: &String| a.len().cmp(&b.len());
    expect(String::from("ring"))
        .using_comparator(by_length)
        .to_equal(String::from("gold"))
        .using_default_comparator()
        .to_not_equal(String::from("gold"));
}

#[test]
fn test_offset_boundary_is_inclusive() {
    expect(8.1f64).to_be_close_to(8.0, offset(0.1));
}

#[test]
#[should_panic(expected = "assertion failed")]
fn test_offset_past_boundary_fails() {
    expect(8.2f64).to_be_close_to(8.0, offset(0.1));
}

#[test]
fn test_map_key_matches_native_lookup() {
    let map = std::collections::HashMap::from([("one", 1), ("two", 2)]);
    assert!(map.contains_key("one"));
    expect_map(map.clone()).to_contain_key("one");
    expect_map(map).to_not_contain_key("three");
}

#[test]
fn test_extracting_nested_path_keeps_nulls_in_position() {
    expect_all(characters())
        .extracting_path("name.first")
        .to_contain_exactly([json!("Frodo"), json!(null), json!("Sam"), json!(null)]);
}

#[test]
fn test_empty_sequence_is_vacuously_sorted_and_duplicate_free() {
    expect_all(Vec::<i32>::new())
        .to_be_sorted()
        .to_not_have_duplicates();
}

#[test]
fn test_filtering_preserves_relative_order() {
    expect_all(characters())
        .filtered_on("age", 800)
        .to_have_size(2)
        .extracting(|c| c.age)
        .to_contain_exactly([800, 800]);
}

#[test]
fn test_description_survives_extraction_and_filtering() {
    let failure = std::panic::catch_unwind(|| {
        expect_all(characters())
            .described_as("the fellowship")
            .filtered_on("age", 33)
            .extracting_path("name.first")
            .to_contain([json!("Sauron")]);
    })
    .unwrap_err();
    let message = failure.downcast_ref::<String>().unwrap();
    assert!(message.contains("[the fellowship]"));
}

#[test]
fn test_navigation_narrows_the_chain() {
    expect_all(characters())
        .filtered_on_null("name")
        .first()
        .to_satisfy(|c| c.age == 800);

    expect_map(std::collections::BTreeMap::from([("a", 1), ("b", 2)]))
        .keys()
        .to_contain_exactly(["a", "b"]);
}

#[test]
fn test_conditions_compose_across_wrappers() {
    let ancient = Condition::new("ancient", |c: &Character| c.age > 100);
    let named = Condition::new("named", |c: &Character| c.name.is_some());

    expect_all(characters())
        .to_have_exactly(2, &ancient)
        .to_have_exactly(2, &named)
        .to_have_none(&ancient.clone().and(named));
}

#[test]
fn test_entry_and_index_arguments() {
    expect_map(std::collections::BTreeMap::from([("Frodo", 33)]))
        .to_contain([entry("Frodo", 33)]);
    expect_all(["a", "b"]).to_contain_at("b", at_index(1));
}

// The toggle is process-wide, so both halves must run in a single test.
#[test]
fn test_location_toggle_strips_and_restores_call_site() {
    crate::report::set_include_locations(false);
    let failure = std::panic::catch_unwind(|| {
        expect(1).to_equal(2);
    })
    .unwrap_err();
    crate::report::set_include_locations(true);
    let message = failure.downcast_ref::<String>().unwrap();
    assert!(!message.contains("  at: "));

    let failure = std::panic::catch_unwind(|| {
        expect(1).to_equal(2);
    })
    .unwrap_err();
    let message = failure.downcast_ref::<String>().unwrap();
    assert!(message.contains("tests.rs"));
}

#[test]
fn test_string_and_path_traits_coexist_on_str_subjects() {
    expect("fixtures/data.json")
        .to_contain("data")
        .to_have_extension("json");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Filtering keeps matches in their original relative order.
        #[test]
        fn filtering_preserves_relative_order(values in prop::collection::vec(0i32..10, 0..40)) {
            let expected: Vec<i32> = values.iter().copied().filter(|v| v % 2 == 0).collect();
            expect_all(values).filtered(|v| v % 2 == 0).to_contain_exactly(expected);
        }

        /// A sequence sorted by the standard sort passes to_be_sorted.
        #[test]
        fn sorted_vectors_are_sorted(mut values in prop::collection::vec(-1000i32..1000, 0..40)) {
            values.sort();
            expect_all(values).to_be_sorted();
        }

        /// Installing then resetting a comparator is the identity.
        #[test]
        fn comparator_round_trip(a in -1000i32..1000, b in -1000i32..1000) {
            let chain = expect(a)
                .using_comparator(|x: &i32, y: &i32| x.abs().cmp(&y.abs()))
                .using_default_comparator();
            if a == b {
                chain.to_equal(b);
            } else {
                chain.to_not_equal(b);
            }
        }
    }
}
