//! Deterministic, pure logic shared by the catalog.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod equality;
pub mod expectation;
pub mod invariants;
pub mod path;
pub mod selector;
pub mod types;
pub mod value;
