// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Immutable key/value context carried with every notification.
//!
//! A subscription starts with the context supplied at subscribe time. Each
//! operator forwards the incoming context unchanged unless it is explicitly a
//! context transformer, in which case it derives a child context with
//! [`Context::with_value`]. Derivation is cheap: contexts share structure
//! through reference counting, so a child costs one small allocation.
//!
//! A context may also carry a [`CancellationToken`]. Cancelling it acts on
//! subscribers exactly like unsubscribing: no further notifications are
//! delivered and no `Error` is synthesised.

use crate::cancellation_token::CancellationToken;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An immutable map of string keys to type-erased values.
///
/// # Example
///
/// ```
/// use rxflow_core::Context;
///
/// let ctx = Context::new().with_value("tenant", "acme".to_string());
/// let child = ctx.with_value("request-id", 42u64);
///
/// assert_eq!(child.get::<String>("tenant").as_deref(), Some(&"acme".to_string()));
/// assert_eq!(*child.get::<u64>("request-id").unwrap(), 42);
/// assert!(ctx.get::<u64>("request-id").is_none());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
    token: Option<CancellationToken>,
}

struct Node {
    key: String,
    value: Arc<dyn Any + Send + Sync>,
    next: Option<Arc<Node>>,
}

impl Context {
    /// Creates an empty context with no cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a child context with `key` bound to `value`.
    ///
    /// The parent context is unaffected. A rebound key shadows the parent's
    /// binding.
    #[must_use]
    pub fn with_value<V: Any + Send + Sync>(&self, key: impl Into<String>, value: V) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: key.into(),
                value: Arc::new(value),
                next: self.head.clone(),
            })),
            token: self.token.clone(),
        }
    }

    /// Looks up `key`, downcasting the stored value to `V`.
    ///
    /// Returns `None` if the key is absent or bound to a different type.
    #[must_use]
    pub fn get<V: Any + Send + Sync>(&self, key: &str) -> Option<Arc<V>> {
        let mut current = self.head.as_ref();
        while let Some(node) = current {
            if node.key == key {
                return node.value.clone().downcast::<V>().ok();
            }
            current = node.next.as_ref();
        }
        None
    }

    /// Returns `true` if `key` is bound in this context.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        let mut current = self.head.as_ref();
        while let Some(node) = current {
            if node.key == key {
                return true;
            }
            current = node.next.as_ref();
        }
        false
    }

    /// Derives a child context carrying the given cancellation token.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            head: self.head.clone(),
            token: Some(token),
        }
    }

    /// Returns the cancellation token attached to this context, if any.
    #[must_use]
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    /// Returns `true` if this context carries a cancelled token.
    ///
    /// A context without a token is never cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut current = self.head.as_ref();
        while let Some(node) = current {
            keys.push(node.key.as_str());
            current = node.next.as_ref();
        }
        f.debug_struct("Context")
            .field("keys", &keys)
            .field("cancellable", &self.token.is_some())
            .finish()
    }
}
