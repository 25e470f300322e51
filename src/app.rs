use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/water", post(handlers::set_water))
        .route("/api/habits", post(handlers::set_habits))
        .route("/api/meals", post(handlers::add_meal))
        .route("/api/exercises", post(handlers::add_exercise))
        .route("/api/sleep", post(handlers::log_sleep))
        .route("/api/analytics", get(handlers::get_analytics))
        .with_state(state)
}
