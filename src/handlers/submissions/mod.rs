//! Submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Routes nested under `/problems`
pub fn problem_routes(state: &AppState) -> Router<AppState> {
    let authed = Router::new()
        .route("/{problem_id}/submissions", post(handler::create_submission))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/{problem_id}/submissions", get(handler::list_problem_submissions))
        .merge(authed)
}

/// Routes nested under `/submissions`
pub fn routes(state: &AppState) -> Router<AppState> {
    let authed = Router::new()
        .route("/{id}/source", get(handler::get_submission_source))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/{id}", get(handler::get_submission))
        .merge(authed)
}
