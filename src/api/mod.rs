//! API endpoint modules.

pub mod auth;
pub mod builds;
pub mod health;
pub mod openapi;
pub mod runs;
pub mod test_details;

pub use auth::configure_routes as configure_auth_routes;
pub use builds::configure_routes as configure_build_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use runs::configure_routes as configure_run_routes;
pub use test_details::configure_routes as configure_test_routes;

use actix_web::web;

/// Register every API route. Mounted under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_run_routes)
        .configure(configure_test_routes)
        .configure(configure_build_routes)
        .configure(configure_auth_routes);
}
