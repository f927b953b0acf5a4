//! NayDuck UI server library.
//!
//! Schedules test runs into the database and builds the run, test, build
//! and history views shown by the NayDuck dashboard.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
