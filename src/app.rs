use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/signup", post(handlers::signup))
        .route("/unregister", post(handlers::unregister))
        .route("/donate", post(handlers::donate))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
