//! Matching support module
//!
//! Crossing predicate shared by the book's matching loop and its tests.

pub mod crossing;
