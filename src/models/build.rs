//! Build detail view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::format_elapsed;
use super::log::LogPayload;
use super::run::RunInfo;
use crate::entity::build;

/// A build with its output and the run it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BuildInfo {
    pub build_id: i32,
    pub run_id: i32,
    pub status: String,
    pub is_release: bool,
    pub features: String,
    pub started: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_time: Option<String>,
    pub stdout: Option<LogPayload>,
    pub stderr: Option<LogPayload>,
    pub run: RunInfo,
}

impl BuildInfo {
    pub fn new(model: build::Model, run: RunInfo) -> Self {
        BuildInfo {
            build_time: format_elapsed(model.started, model.finished),
            build_id: model.build_id,
            run_id: model.run_id,
            status: model.status,
            is_release: model.is_release,
            features: model.features,
            started: model.started,
            finished: model.finished,
            stdout: model.stdout.map(LogPayload::decode),
            stderr: model.stderr.map(LogPayload::decode),
            run,
        }
    }
}
