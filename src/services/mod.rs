//! Business logic services.

pub mod auth_code;
pub mod history;
pub mod runs;
pub mod scheduling;
pub mod status;

pub use auth_code::{get_auth_code, get_github_login};
pub use history::{
    HISTORY_LENGTH, describe_test, get_history_for_base_branch, get_test_history,
    get_test_history_by_id, history_stats,
};
pub use runs::{get_build_info, get_one_run, get_one_test, get_run_info};
pub use scheduling::{cancel_the_run, schedule_a_run};
pub use status::{RUNS_ON_DASHBOARD, get_all_runs, statuses_for_runs};
