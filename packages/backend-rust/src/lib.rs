pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::AppState;

/// Router with the middleware stack the binary serves
pub fn create_app(config: Config) -> axum::Router {
    let state = AppState::new(config);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
