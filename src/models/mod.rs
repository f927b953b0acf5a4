//! Domain models for the NayDuck UI server.

use chrono::{DateTime, Utc};

pub mod auth;
pub mod build;
pub mod history;
pub mod log;
pub mod run;
pub mod status;
pub mod test_spec;

// Re-export commonly used types
pub use auth::{AuthCodeRequest, AuthCodeResponse};
pub use build::BuildInfo;
pub use history::{BaseBranchHistory, HistoryEntry, HistoryStats, NO_HISTORY_TEST_ID};
pub use log::{LogInfo, LogPayload, prettify_size};
pub use run::{
    BuildBrief, BuildSummary, CancelRunRequest, CancelRunResponse, NewRunRequest,
    NewRunResponse, RunInfo, RunSummary, ScheduleRequest, TEST_SPECIFIC_STATUS,
    UNTRACKED_BUILD_ID,
};
pub use status::{CANCEL_STATUSES, StatusCounts, TestStatus};
pub use test::{RunTest, TestDetail, TestView};
pub use test_spec::{BuildKey, SCHEDULER_REQUESTER, TestSpec, display_name, priority_for};

/// Elapsed time between two timestamps formatted as `H:MM:SS`, prefixed with
/// the number of days when longer than a day.
///
/// Returns `None` unless both timestamps are known.
pub fn format_elapsed(
    started: Option<DateTime<Utc>>,
    finished: Option<DateTime<Utc>>,
) -> Option<String> {
    let (started, finished) = (started?, finished?);
    let seconds = (finished - started).num_seconds().max(0);
    let (days, rest) = (seconds / 86_400, seconds % 86_400);
    let clock = format!("{}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60);

    Some(match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        _ => format!("{} days, {}", days, clock),
    })
}
