// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Left-to-right operator composition.
//!
//! An [`Operator`] is a pure value-level transformation from one observable
//! to another; nothing runs until the composed observable is subscribed.
//! `pipe1` … `pipe11` compose typed chains, [`pipe_dyn`] composes an
//! arbitrary homogeneously-typed list, and [`Observable::pipe`] chains one
//! step fluently.

use crate::observable::Observable;
use std::sync::Arc;

/// A reusable `Observable<I> -> Observable<O>` transformation.
///
/// Operators are cheap to clone and safe to apply to any number of sources;
/// per-subscription state is allocated inside the produced observable's
/// on-subscribe thunk, never inside the operator itself.
///
/// # Example
///
/// ```
/// use rxflow_core::{pipe1, Observable, Operator};
///
/// let identity: Operator<i32, i32> = Operator::new(|source| source);
/// let stream = pipe1(Observable::just(vec![1, 2, 3]), &identity);
/// # let _ = stream;
/// ```
pub struct Operator<I, O> {
    apply: Arc<dyn Fn(Observable<I>) -> Observable<O> + Send + Sync>,
}

impl<I, O> Clone for Operator<I, O> {
    fn clone(&self) -> Self {
        Self {
            apply: self.apply.clone(),
        }
    }
}

impl<I, O> Operator<I, O> {
    /// Wraps a composition function into a reusable operator.
    pub fn new(f: impl Fn(Observable<I>) -> Observable<O> + Send + Sync + 'static) -> Self {
        Self { apply: Arc::new(f) }
    }

    /// Applies this operator to a source observable.
    #[must_use]
    pub fn apply(&self, source: Observable<I>) -> Observable<O> {
        let f = self.apply.as_ref();
        f(source)
    }
}

/// Shorthand constructor for [`Operator::new`].
pub fn op<I, O>(f: impl Fn(Observable<I>) -> Observable<O> + Send + Sync + 'static) -> Operator<I, O> {
    Operator::new(f)
}

impl<T: Send + 'static> Observable<T> {
    /// Applies one operator, fluently.
    ///
    /// `source.pipe(&a).pipe(&b)` is equivalent to `pipe2(source, &a, &b)`.
    #[must_use]
    pub fn pipe<U: Send + 'static>(self, operator: &Operator<T, U>) -> Observable<U> {
        operator.apply(self)
    }
}

// One macro arm per arity keeps the eleven typed variants from drifting
// apart. `$last` names the output type of the final stage.
macro_rules! define_pipe {
    ($(#[$docs:meta])* $name:ident, $last:ident, $t0:ident, $(($opn:ident, $input:ident, $out:ident)),+) => {
        $(#[$docs])*
        pub fn $name<$t0: Send + 'static, $($out: Send + 'static),+>(
            source: Observable<$t0>,
            $($opn: &Operator<$input, $out>,)+
        ) -> Observable<$last> {
            let stream = source;
            $(let stream = $opn.apply(stream);)+
            stream
        }
    };
}

define_pipe!(
    /// Composes one operator with a source.
    pipe1, T1, T0, (op1, T0, T1)
);
define_pipe!(
    /// Composes two operators left-to-right.
    pipe2, T2, T0, (op1, T0, T1), (op2, T1, T2)
);
define_pipe!(
    /// Composes three operators left-to-right.
    pipe3, T3, T0, (op1, T0, T1), (op2, T1, T2), (op3, T2, T3)
);
define_pipe!(
    /// Composes four operators left-to-right.
    pipe4, T4, T0, (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4)
);
define_pipe!(
    /// Composes five operators left-to-right.
    pipe5, T5, T0, (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4), (op5, T4, T5)
);
define_pipe!(
    /// Composes six operators left-to-right.
    pipe6, T6, T0,
    (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4), (op5, T4, T5), (op6, T5, T6)
);
define_pipe!(
    /// Composes seven operators left-to-right.
    pipe7, T7, T0,
    (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4), (op5, T4, T5), (op6, T5, T6),
    (op7, T6, T7)
);
define_pipe!(
    /// Composes eight operators left-to-right.
    pipe8, T8, T0,
    (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4), (op5, T4, T5), (op6, T5, T6),
    (op7, T6, T7), (op8, T7, T8)
);
define_pipe!(
    /// Composes nine operators left-to-right.
    pipe9, T9, T0,
    (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4), (op5, T4, T5), (op6, T5, T6),
    (op7, T6, T7), (op8, T7, T8), (op9, T8, T9)
);
define_pipe!(
    /// Composes ten operators left-to-right.
    pipe10, T10, T0,
    (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4), (op5, T4, T5), (op6, T5, T6),
    (op7, T6, T7), (op8, T7, T8), (op9, T8, T9), (op10, T9, T10)
);
define_pipe!(
    /// Composes eleven operators left-to-right.
    pipe11, T11, T0,
    (op1, T0, T1), (op2, T1, T2), (op3, T2, T3), (op4, T3, T4), (op5, T4, T5), (op6, T5, T6),
    (op7, T6, T7), (op8, T7, T8), (op9, T8, T9), (op10, T9, T10), (op11, T10, T11)
);

/// Composes an arbitrary list of same-typed operators left-to-right.
///
/// The dynamic fallback for chains longer than eleven stages or built at
/// runtime. Type changes across stages require the typed `pipeN` forms.
#[must_use]
pub fn pipe_dyn<T: Send + 'static>(
    source: Observable<T>,
    operators: Vec<Operator<T, T>>,
) -> Observable<T> {
    operators
        .into_iter()
        .fold(source, |stream, operator| operator.apply(stream))
}
