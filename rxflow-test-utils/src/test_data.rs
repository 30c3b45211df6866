// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared fixtures used across the workspace's integration tests.

/// A small value type with identity, for operators that compare or key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

pub fn person_alice() -> Person {
    Person::new("Alice", 34)
}

pub fn person_bob() -> Person {
    Person::new("Bob", 41)
}

pub fn person_carol() -> Person {
    Person::new("Carol", 28)
}
