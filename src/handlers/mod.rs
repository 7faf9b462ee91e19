//! HTTP Request Handlers

pub mod health;
pub mod submissions;

use axum::{Router, middleware};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{middleware::logging_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/problems", submissions::problem_routes(state))
        .nest("/submissions", submissions::routes(state))
}

/// Build the full application with its middleware stack
pub fn create_router(state: AppState) -> Router {
    routes(&state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
