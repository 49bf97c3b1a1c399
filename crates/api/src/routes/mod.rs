pub mod health;
pub mod meeting_room;
pub mod queues;

use axum::{middleware::from_fn, Router};

use crate::middleware::request_id::request_id;
use crate::state::AppState;

pub fn v1_router(state: AppState) -> Router {
    Router::new()
        .merge(meeting_room::router(state.clone()))
        .merge(queues::router(state))
}

pub fn health_router(state: AppState) -> Router {
    health::router(state)
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health_router(state.clone()))
        .merge(v1_router(state))
        .layer(from_fn(request_id))
}
