//! SeaORM database migrations.
//!
//! Written with the schema builder so the same migrations run on PostgreSQL
//! in production and on SQLite in tests.

pub use sea_orm_migration::prelude::*;

mod m20240501_000001_create_runs;
mod m20240501_000002_create_builds;
mod m20240501_000004_create_logs;
mod m20240501_000005_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_runs::Migration),
            Box::new(m20240501_000002_create_builds::Migration),
            Box::new(m20240501_000003_create_tests::Migration),
            Box::new(m20240501_000004_create_logs::Migration),
            Box::new(m20240501_000005_create_users::Migration),
        ]
    }
}
