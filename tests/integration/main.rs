//! Integration test harness
//!
//! Tests run against a live server; start one and run with:
//! `cargo test -- --ignored`

mod api_tests;
mod common;
mod lifecycle_tests;
