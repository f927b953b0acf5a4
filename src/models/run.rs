//! Run domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::{StatusCounts, TestStatus};
use crate::entity::run;

/// Build id standing in for tests without a tracked build.
pub const UNTRACKED_BUILD_ID: i32 = 0;

/// Status shown for the stand-in build of untracked tests.
pub const TEST_SPECIFIC_STATUS: &str = "TEST SPECIFIC";

/// Run data shared by every view that shows a run.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RunInfo {
    pub id: i32,
    pub branch: String,
    pub sha: String,
    /// Author of the commit.
    pub user: String,
    pub title: String,
    pub requester: String,
    pub started: DateTime<Utc>,
}

impl From<run::Model> for RunInfo {
    fn from(model: run::Model) -> Self {
        RunInfo {
            id: model.id,
            branch: model.branch,
            sha: model.sha,
            user: model.user,
            title: model.title,
            requester: model.requester,
            started: model.started,
        }
    }
}

/// Build of a run as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BuildSummary {
    pub build_id: i32,
    pub status: String,
    pub is_release: bool,
    pub features: String,
    /// Test counts per status category.
    pub tests: StatusCounts,
}

impl BuildSummary {
    /// Stand-in build for runs that predate build tracking.
    pub fn test_specific() -> Self {
        let build = BuildBrief::test_specific();
        BuildSummary {
            build_id: build.build_id,
            status: build.status,
            is_release: build.is_release,
            features: build.features,
            tests: StatusCounts::default(),
        }
    }
}

/// Build a test belongs to, without status counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BuildBrief {
    pub build_id: i32,
    pub status: String,
    pub is_release: bool,
    pub features: String,
}

impl BuildBrief {
    pub fn test_specific() -> Self {
        BuildBrief {
            build_id: UNTRACKED_BUILD_ID,
            status: TEST_SPECIFIC_STATUS.to_string(),
            is_release: false,
            features: String::new(),
        }
    }
}

/// A run on the dashboard with its builds.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RunSummary {
    #[serde(flatten)]
    pub run: RunInfo,
    pub builds: Vec<BuildSummary>,
}

/// Everything needed to schedule a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub branch: String,
    pub sha: String,
    /// Author of the commit.
    pub user: String,
    pub title: String,
    /// Test command lines, in the order they were requested.
    pub tests: Vec<String>,
    /// Login of whoever requested the run.
    pub requester: String,
}

/// Request body for scheduling a new run. The requester comes from the auth code.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewRunRequest {
    pub branch: String,
    pub sha: String,
    pub user: String,
    pub title: String,
    pub tests: Vec<String>,
}

impl NewRunRequest {
    pub fn into_schedule(self, requester: String) -> ScheduleRequest {
        ScheduleRequest {
            branch: self.branch,
            sha: self.sha,
            user: self.user,
            title: self.title,
            tests: self.tests,
            requester,
        }
    }
}

/// Response after scheduling a run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewRunResponse {
    pub run_id: i32,
}

/// Optional body for cancelling a run.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CancelRunRequest {
    /// Status to give pending tests: CANCELED (default), IGNORED or SKIPPED.
    #[serde(default)]
    pub status: Option<String>,
}

impl CancelRunRequest {
    pub fn status(&self) -> &str {
        self.status
            .as_deref()
            .unwrap_or(TestStatus::Canceled.as_str())
    }
}

/// Response after cancelling a run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelRunResponse {
    pub run_id: i32,
    /// Number of pending tests that were terminated.
    pub canceled: u64,
}
