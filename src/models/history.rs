//! Test history models.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use super::log::LogInfo;
use super::status::TestStatus;

/// Test id reported when a test has no history on a branch.
pub const NO_HISTORY_TEST_ID: i32 = -1;

/// One past execution of a test.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HistoryEntry {
    pub test_id: i32,
    pub requester: String,
    pub title: String,
    pub status: String,
    pub started: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
    pub branch: String,
    pub sha: String,
    /// Elapsed time (`H:MM:SS`) when the test has both started and finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<LogInfo>>,
}

/// Pass/fail summary of a test history.
///
/// Build failures and timeouts count as failures; everything that is not a
/// final verdict (pending, running, ignored, canceled, ...) counts as other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct HistoryStats {
    #[serde(rename = "PASSED")]
    pub passed: usize,
    #[serde(rename = "FAILED")]
    pub failed: usize,
    #[serde(rename = "OTHER")]
    pub other: usize,
}

impl HistoryStats {
    pub fn record(&mut self, status: &str) {
        match TestStatus::parse(status) {
            Some(TestStatus::Passed) => self.passed += 1,
            Some(TestStatus::Failed | TestStatus::BuildFailed | TestStatus::Timeout) => {
                self.failed += 1
            }
            _ => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.other
    }
}

impl<'a> FromIterator<&'a str> for HistoryStats {
    fn from_iter<I: IntoIterator<Item = &'a str>>(statuses: I) -> Self {
        let mut stats = HistoryStats::default();
        for status in statuses {
            stats.record(status);
        }
        stats
    }
}

/// History of a test on another (base) branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BaseBranchHistory {
    pub history: HistoryStats,
    /// Most recent matching test on the branch, `-1` when there is none.
    #[serde(serialize_with = "serialize_history_test_id")]
    #[schema(value_type = i32)]
    pub test_id: Option<i32>,
}

fn serialize_history_test_id<S: Serializer>(
    test_id: &Option<i32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i32(test_id.unwrap_or(NO_HISTORY_TEST_ID))
}
