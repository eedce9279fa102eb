//! Integration tests for the no-duplication guard

use std::collections::HashSet;

use variety::{FuzzError, Fuzzable, Fuzzer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Fuzzable)]
enum Light {
    Red,
    Amber,
    Green,
}

fn fuzzer(seed: i32) -> Fuzzer {
    variety::register_log_sink(|_: &str| {});
    Fuzzer::with_seed(seed).unwrap()
}

#[test]
fn test_enum_pool_is_exhausted_then_fails() {
    let parent = fuzzer(5);
    let mut scope = parent.no_duplication_fuzzer();

    let mut lights: Vec<Light> = (0..3)
        .map(|_| scope.generate_enum::<Light>().unwrap())
        .collect();
    lights.sort();
    assert_eq!(lights, vec![Light::Red, Light::Amber, Light::Green]);

    match scope.generate_enum::<Light>() {
        Err(FuzzError::Duplication(failure)) => {
            assert_eq!(failure.max_attempts, variety::DEFAULT_MAX_FAILING_ATTEMPTS);
            assert_eq!(failure.already_provided, vec!["Red", "Amber", "Green"]);
            let message = failure.to_string();
            assert!(message.contains("no_duplication_fuzzer"));
            assert!(message.contains("max_failing_attempts"));
        }
        other => panic!("expected a duplication failure, got {:?}", other),
    }
}

#[test]
fn test_candidate_pool_of_n_fails_on_call_n_plus_one() {
    let mut scope = fuzzer(17).no_duplication_fuzzer();
    scope.set_max_failing_attempts(500).unwrap();
    let candidates = ["north", "south", "east", "west"];

    let mut picked = HashSet::new();
    for _ in 0..candidates.len() {
        assert!(picked.insert(scope.pick_one_from(&candidates[..]).unwrap()));
    }

    let err = scope.pick_one_from(&candidates[..]).unwrap_err();
    assert!(err.is_exhausted());
}

#[test]
fn test_scopes_are_independent() {
    let parent = fuzzer(23);
    let mut first = parent.no_duplication_fuzzer();
    let mut second = parent.no_duplication_fuzzer();

    let from_first = first
        .collect_distinct(10, |f| f.generate_integer(Some(1), Some(3)))
        .unwrap();
    let from_second = second
        .collect_distinct(10, |f| f.generate_integer(Some(1), Some(3)))
        .unwrap();

    assert_eq!(from_first.len(), 3);
    assert_eq!(from_second.len(), 3);
}

#[test]
fn test_arguments_key_separate_streams() {
    let mut scope = fuzzer(23).no_duplication_fuzzer();

    assert_eq!(scope.generate_integer(Some(4), Some(4)).unwrap(), 4);
    assert_eq!(scope.generate_integer(Some(5), Some(5)).unwrap(), 5);
    assert_eq!(scope.generate_positive_integer(Some(1)).unwrap(), 1);
    assert!(scope.generate_integer(Some(4), Some(4)).is_err());
}

#[test]
fn test_sub_fuzzer_shares_the_parent_stream() {
    let parent = fuzzer(1226354269);
    let mut scope = parent.no_duplication_fuzzer();
    let mut replay = fuzzer(1226354269);

    assert_eq!(
        scope.generate_positive_integer(None).unwrap(),
        replay.generate_positive_integer(None).unwrap()
    );
}

#[test]
fn test_ten_thousand_distinct_longs() {
    variety::register_log_sink(|_: &str| {});
    let mut fuzzer = Fuzzer::builder()
        .seed(1001)
        .avoid_duplicates(true)
        .build()
        .unwrap();

    let longs: HashSet<i64> = (0..10_000)
        .map(|_| fuzzer.generate_long(None, None).unwrap())
        .collect();
    assert_eq!(longs.len(), 10_000);
}

#[test]
fn test_hundred_thousand_distinct_guids() {
    let mut scope = fuzzer(2002).no_duplication_fuzzer();

    let guids: HashSet<uuid::Uuid> = (0..100_000)
        .map(|_| scope.generate_guid().unwrap())
        .collect();
    assert_eq!(guids.len(), 100_000);
}

#[test]
fn test_range_errors_are_not_retried() {
    let mut scope = fuzzer(3).no_duplication_fuzzer();
    for _ in 0..3 {
        assert!(matches!(
            scope.generate_password(Some(2), Some(1), None),
            Err(FuzzError::InvalidRange { .. })
        ));
    }
}

#[test]
fn test_null_and_empty_candidates_are_distinct_errors() {
    let mut fuzzer = fuzzer(3);
    let empty: &[u8] = &[];

    assert_eq!(
        fuzzer.pick_one_from(None::<&[u8]>),
        Err(FuzzError::NullCandidates { parameter: "candidates" })
    );
    assert_eq!(
        fuzzer.pick_one_from(empty),
        Err(FuzzError::EmptyCandidates { parameter: "candidates" })
    );
}
