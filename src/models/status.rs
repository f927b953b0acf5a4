//! Test and build statuses, and per-build status tallies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status of a test or build as stored in the database.
///
/// Workers outside this server may write statuses not listed here; those are
/// kept as raw strings on the entities and only classified where needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    Pending,
    Running,
    Passed,
    Failed,
    BuildFailed,
    Timeout,
    Ignored,
    Canceled,
    Skipped,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::BuildFailed => "BUILD FAILED",
            Self::Timeout => "TIMEOUT",
            Self::Ignored => "IGNORED",
            Self::Canceled => "CANCELED",
            Self::Skipped => "SKIPPED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "RUNNING" => Some(Self::Running),
            "PASSED" => Some(Self::Passed),
            "FAILED" => Some(Self::Failed),
            "BUILD FAILED" => Some(Self::BuildFailed),
            "TIMEOUT" => Some(Self::Timeout),
            "IGNORED" => Some(Self::Ignored),
            "CANCELED" => Some(Self::Canceled),
            "SKIPPED" => Some(Self::Skipped),
            _ => None,
        }
    }
}

/// Statuses a pending test may be terminated with when its run is cancelled.
/// None of them is a verdict, so they never count as a pass or a failure.
pub const CANCEL_STATUSES: [TestStatus; 3] =
    [TestStatus::Canceled, TestStatus::Ignored, TestStatus::Skipped];

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lower-case a status and replace spaces with underscores (`BUILD FAILED` → `build_failed`).
pub fn normalize_status(status: &str) -> String {
    status.to_lowercase().replace(' ', "_")
}

/// Count of tests per status category for one build of one run.
///
/// `failed` overlaps the other categories: it counts every status whose
/// normalized name contains `failed`, `build_failed` included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub pending: u64,
    pub running: u64,
    pub passed: u64,
    pub ignored: u64,
    pub build_failed: u64,
    pub canceled: u64,
    pub timeout: u64,
    pub failed: u64,
}

impl StatusCounts {
    /// Add `count` tests that reported `status`.
    pub fn record(&mut self, status: &str, count: u64) {
        let status = normalize_status(status);
        if let Some(slot) = self.category_mut(&status) {
            *slot += count;
        }
        if status.contains("failed") {
            self.failed += count;
        }
    }

    fn category_mut(&mut self, category: &str) -> Option<&mut u64> {
        match category {
            "pending" => Some(&mut self.pending),
            "running" => Some(&mut self.running),
            "passed" => Some(&mut self.passed),
            "ignored" => Some(&mut self.ignored),
            "build_failed" => Some(&mut self.build_failed),
            "canceled" => Some(&mut self.canceled),
            "timeout" => Some(&mut self.timeout),
            _ => None,
        }
    }

    /// Sum of the seven recognized categories (`failed` excluded).
    pub fn categorized(&self) -> u64 {
        self.pending
            + self.running
            + self.passed
            + self.ignored
            + self.build_failed
            + self.canceled
            + self.timeout
    }
}
