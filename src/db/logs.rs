//! Database operations for test logs.

use sea_orm::*;

use crate::entity::log;
use crate::error::AppResult;

/// Log columns without the stored contents.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct LogMeta {
    pub test_id: i32,
    pub log_type: String,
    pub size: i64,
    pub storage: String,
    pub stack_trace: bool,
    pub patterns: Option<String>,
}

impl From<log::Model> for LogMeta {
    fn from(model: log::Model) -> Self {
        LogMeta {
            test_id: model.test_id,
            log_type: model.log_type,
            size: model.size,
            storage: model.storage,
            stack_trace: model.stack_trace,
            patterns: model.patterns,
        }
    }
}

/// Log metadata of a test, ordered by log type.
pub async fn get_log_meta_for_test<C: ConnectionTrait>(
    db: &C,
    test_id: i32,
) -> AppResult<Vec<LogMeta>> {
    let rows = log::Entity::find()
        .select_only()
        .column(log::Column::TestId)
        .column_as(log::Column::LogType, "log_type")
        .columns([
            log::Column::Size,
            log::Column::Storage,
            log::Column::StackTrace,
            log::Column::Patterns,
        ])
        .filter(log::Column::TestId.eq(test_id))
        .order_by_asc(log::Column::LogType)
        .into_model::<LogMeta>()
        .all(db)
        .await?;

    Ok(rows)
}

/// Logs of a test with their truncated contents, ordered by log type.
pub async fn get_logs_for_test<C: ConnectionTrait>(
    db: &C,
    test_id: i32,
) -> AppResult<Vec<log::Model>> {
    let logs = log::Entity::find()
        .filter(log::Column::TestId.eq(test_id))
        .order_by_asc(log::Column::LogType)
        .all(db)
        .await?;

    Ok(logs)
}

/// Store a log for a test. Used by workers and test fixtures.
pub async fn insert_log<C: ConnectionTrait>(db: &C, model: log::ActiveModel) -> AppResult<()> {
    log::Entity::insert(model).exec_without_returning(db).await?;
    Ok(())
}
