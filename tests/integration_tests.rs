//! Integration tests runner

#[path = "common.rs"]
mod common;

#[path = "support/mod.rs"]
mod support;

#[path = "integration/config_test.rs"]
mod config_test;

#[path = "integration/maps_test.rs"]
mod maps_test;

#[path = "integration/match_test.rs"]
mod match_test;
