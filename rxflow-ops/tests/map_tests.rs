// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{FlowError, Observable};
use rxflow_exec::collect;
use rxflow_ops::MapExt;
use rxflow_test_utils::test_data::{person_alice, person_bob};

#[derive(Debug)]
struct ParseFailure;

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse failure")
    }
}

impl std::error::Error for ParseFailure {}

#[test]
fn map_transforms_every_value() {
    let doubled = Observable::just(vec![1, 2, 3]).map(|v| v * 2);
    assert_eq!(collect(&doubled), (vec![2, 4, 6], None));
}

#[test]
fn map_changes_the_element_type() {
    let names = Observable::just(vec![person_alice(), person_bob()]).map(|p| p.name);
    assert_eq!(
        collect(&names).0,
        vec!["Alice".to_string(), "Bob".to_string()]
    );
}

#[test]
fn try_map_forwards_ok_values() {
    let parsed =
        Observable::just(vec!["1", "2"]).try_map(|s| s.parse::<i32>().map_err(|_| ParseFailure));
    assert_eq!(collect(&parsed), (vec![1, 2], None));
}

#[test]
fn try_map_converts_err_into_stream_failure() {
    let parsed = Observable::just(vec!["1", "oops", "3"])
        .try_map(|s| s.parse::<i32>().map_err(|_| ParseFailure));

    let (values, error) = collect(&parsed);
    assert_eq!(values, vec![1]);
    assert!(matches!(error, Some(FlowError::UserError(_))));
}
