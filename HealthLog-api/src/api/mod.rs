pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;

use crate::config::AppConfig;
use state::AppState;

/// Create the application router with the default services
pub fn create_application(config: &AppConfig) -> Router {
    handlers::health::initialize_server_start_time();
    routes::create_app(AppState::new(config))
}
