// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{pipe1, op, Observable};
use rxflow_exec::collect;
use rxflow_ops::FilterExt;
use rxflow_test_utils::test_error;

#[test]
fn keeps_only_matching_values() {
    let evens = Observable::just(vec![1, 2, 3, 4, 5]).filter(|v| v % 2 == 0);
    assert_eq!(collect(&evens), (vec![2, 4], None));
}

#[test]
fn piped_filter_matches_direct_application() {
    let even = op(|source: Observable<i32>| source.filter(|v| v % 2 == 0));
    let piped = pipe1(Observable::just(vec![1, 2, 3, 4, 5]), &even);
    assert_eq!(collect(&piped), (vec![2, 4], None));
}

#[test]
fn rejecting_everything_still_completes() {
    let none = Observable::just(vec![1, 3, 5]).filter(|v| v % 2 == 0);
    assert_eq!(collect(&none), (vec![], None));
}

#[test]
fn errors_bypass_the_predicate() {
    let failing = Observable::<i32>::throw(test_error()).filter(|_v| false);
    let (values, error) = collect(&failing);
    assert!(values.is_empty());
    assert_eq!(error, Some(test_error()));
}
