//! Database module providing connection management, migrations, and queries.
//!
//! Query functions are generic over [`ConnectionTrait`] so the same code runs
//! directly on the pool or inside a transaction opened with
//! [`DbPool::with_transaction`].
//!
//! [`ConnectionTrait`]: sea_orm::ConnectionTrait

pub mod builds;
pub mod logs;
pub mod runs;
pub mod test_rows;
pub mod users;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::migration::{Migrator, MigratorTrait};

/// Maximum number of pooled connections.
const MAX_CONNECTIONS: u32 = 20;

/// Future returned by a transaction body, borrowing the transaction.
pub type TxFuture<'c, T> = Pin<Box<dyn Future<Output = AppResult<T>> + 'c>>;

/// Database connection pool wrapper.
#[derive(Clone, Debug)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to the database named in the configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(MAX_CONNECTIONS)
            .connect_timeout(Duration::from_secs(10));

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Wrap an already established connection.
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        DbPool { conn }
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))
    }

    /// Run `body` inside a transaction.
    ///
    /// The transaction is committed when `body` returns `Ok` and rolled back
    /// when it returns `Err`; the error is passed through unchanged.
    pub async fn with_transaction<T, F>(&self, body: F) -> AppResult<T>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxFuture<'c, T>,
    {
        let txn = self
            .conn
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let result = body(&txn).await;

        match result {
            Ok(value) => {
                txn.commit().await.map_err(|e| {
                    AppError::Database(format!("Failed to commit transaction: {}", e))
                })?;
                Ok(value)
            }
            Err(err) => {
                if let Err(e) = txn.rollback().await {
                    warn!("Failed to roll back transaction: {}", e);
                }
                Err(err)
            }
        }
    }
}
