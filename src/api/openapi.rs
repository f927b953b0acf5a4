//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::config::ADMIN_KEY_HEADER;
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "NayDuck UI Server",
        version = "0.3.0",
        description = "Schedules test runs and serves run, test, build and history views for the NayDuck dashboard"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::health::ready,
        api::health::info,
        api::runs::list_runs,
        api::runs::get_run,
        api::runs::new_run,
        api::runs::cancel_run,
        api::test_details::get_test,
        api::test_details::get_test_history,
        api::test_details::get_base_branch_history,
        api::builds::get_build,
        api::auth::issue_auth_code,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            api::health::ServerInfoResponse,
            // Runs
            models::RunInfo,
            models::RunSummary,
            models::BuildSummary,
            models::BuildBrief,
            models::StatusCounts,
            models::NewRunRequest,
            models::NewRunResponse,
            models::CancelRunRequest,
            models::CancelRunResponse,
            // Tests
            models::RunTest,
            models::TestDetail,
            models::TestView,
            models::LogInfo,
            models::HistoryEntry,
            models::HistoryStats,
            models::BaseBranchHistory,
            // Builds
            models::BuildInfo,
            models::LogPayload,
            // Auth
            models::AuthCodeRequest,
            models::AuthCodeResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Runs", description = "Run listing, scheduling and cancellation"),
        (name = "Tests", description = "Test details and history"),
        (name = "Builds", description = "Build details and output"),
        (name = "Auth", description = "Auth code issuance")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the auth code and admin key security schemes.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "auth_code",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "NayDuck auth code: `nayduck <code>`",
                ))),
            );
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ADMIN_KEY_HEADER))),
            );
        }
    }
}
