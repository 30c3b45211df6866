// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Empty-law and error-law checks across the operator catalogue: an empty
//! source stays a bare completion through any operator, a failing source
//! stays a bare failure.

use rxflow_core::{op, pipe_dyn, Observable, Operator};
use rxflow_exec::collect;
use rxflow_ops::prelude::*;
use rxflow_test_utils::test_error;

fn catalogue() -> Vec<(&'static str, Operator<i32, i32>)> {
    vec![
        ("map", op(|s: Observable<i32>| s.map(|v| v + 1))),
        ("filter", op(|s: Observable<i32>| s.filter(|_v| true))),
        ("scan", op(|s: Observable<i32>| s.scan(0, |acc, v| acc + v))),
        ("take", op(|s: Observable<i32>| s.take(5))),
        ("take_while", op(|s: Observable<i32>| s.take_while(|_v| true))),
        ("skip", op(|s: Observable<i32>| s.skip(1))),
        ("distinct", op(|s: Observable<i32>| s.distinct())),
        (
            "distinct_until_changed",
            op(|s: Observable<i32>| s.distinct_until_changed()),
        ),
        ("tap", op(|s: Observable<i32>| s.tap(|_v| {}))),
        (
            "merge_map",
            op(|s: Observable<i32>| s.merge_map(|v| Observable::just(vec![v]))),
        ),
        (
            "concat_map",
            op(|s: Observable<i32>| s.concat_map(|v| Observable::just(vec![v]))),
        ),
        (
            "switch_map",
            op(|s: Observable<i32>| s.switch_map(|v| Observable::just(vec![v]))),
        ),
        ("retry", op(|s: Observable<i32>| s.retry(0))),
    ]
}

#[test]
fn every_operator_preserves_the_empty_law() {
    for (name, operator) in catalogue() {
        let through = operator.apply(Observable::empty());
        let (values, error) = collect(&through);
        assert!(values.is_empty(), "{name} emitted values on empty input");
        assert!(error.is_none(), "{name} failed on empty input");
    }
}

#[test]
fn every_operator_preserves_the_error_law() {
    for (name, operator) in catalogue() {
        let through = operator.apply(Observable::throw(test_error()));
        let (values, error) = collect(&through);
        assert!(values.is_empty(), "{name} emitted values on a failing input");
        assert_eq!(
            error,
            Some(test_error()),
            "{name} altered or swallowed the error"
        );
    }
}

#[test]
fn the_whole_catalogue_composes_over_empty() {
    let operators: Vec<Operator<i32, i32>> =
        catalogue().into_iter().map(|(_, operator)| operator).collect();
    let through = pipe_dyn(Observable::empty(), operators);
    assert_eq!(collect(&through), (vec![], None));
}
