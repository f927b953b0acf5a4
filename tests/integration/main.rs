//! Integration test suite.
//!
//! Runs the services and HTTP handlers against an in-memory SQLite database
//! migrated with the production migrations.
//!
//! Run with: cargo test --test integration

mod helpers;

mod api_tests;
mod history_tests;
mod status_tests;
