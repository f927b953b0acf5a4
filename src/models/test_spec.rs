//! Parsing of requested test command lines.
//!
//! A test is requested as a single command string such as
//! `pytest sanity/rpc.py --release --features=nightly_protocol`. The flags
//! embedded in it decide which build the test needs and where it runs.

use super::status::TestStatus;

/// Requester identity of the automated scheduler. Its runs get low priority.
pub const SCHEDULER_REQUESTER: &str = "NayDuck";

const FEATURES_FLAG: &str = "--features";
const RELEASE_FLAG: &str = "--release";
const REMOTE_FLAG: &str = "--remote";
const MOCKNET_MARKER: &str = "mocknet";

/// A test command with its flags pulled apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSpec {
    /// The trimmed command as stored in the `tests` table.
    pub name: String,
    /// Everything from `--features` to the end of the command, or empty.
    pub features: String,
    pub release: bool,
    pub remote: bool,
    /// Mocknet tests run against an existing network and need no build.
    pub mocknet: bool,
}

/// Identity of a build within a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildKey {
    pub release: bool,
    pub features: String,
}

impl TestSpec {
    /// Parse a command string. Never fails: missing flags default to off and
    /// missing features to the empty string.
    pub fn parse(command: &str) -> Self {
        let name = command.trim();
        let features = name
            .find(FEATURES_FLAG)
            .map(|pos| name[pos..].to_string())
            .unwrap_or_default();
        let mocknet = name.contains(MOCKNET_MARKER);

        TestSpec {
            name: name.to_string(),
            features,
            release: name.contains(RELEASE_FLAG),
            remote: mocknet || name.contains(REMOTE_FLAG),
            mocknet,
        }
    }

    pub fn build_key(&self) -> BuildKey {
        BuildKey {
            release: self.release,
            features: self.features.clone(),
        }
    }

    /// Status a freshly created build for this test starts in.
    pub fn initial_build_status(&self) -> TestStatus {
        if self.mocknet {
            TestStatus::Skipped
        } else {
            TestStatus::Pending
        }
    }
}

/// Priority for every test of a run: 1 (low) for the scheduler, 0 otherwise.
pub fn priority_for(requester: &str) -> i32 {
    i32::from(requester == SCHEDULER_REQUESTER)
}

/// Short form of a command for display: the features tail and all other
/// `--flag` tokens are dropped.
pub fn display_name(command: &str) -> String {
    let head = command
        .find(FEATURES_FLAG)
        .map_or(command, |pos| &command[..pos]);
    head.split_whitespace()
        .filter(|token| !token.starts_with("--"))
        .collect::<Vec<_>>()
        .join(" ")
}
