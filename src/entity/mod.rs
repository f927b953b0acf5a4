//! SeaORM entity definitions.

pub mod build;
pub mod log;
pub mod run;
pub mod user;
