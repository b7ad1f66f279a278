use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/ritual", get(handlers::get_ritual))
        .route("/api/gesture", post(handlers::gesture))
        .route("/api/view", post(handlers::view))
        .route("/api/log", post(handlers::log_activity))
        .route("/api/today", get(handlers::get_today))
        .route("/api/weekly", get(handlers::get_weekly))
        .route("/api/history", get(handlers::get_history))
        .route("/api/orbitals", get(handlers::get_orbitals).put(handlers::put_orbitals))
        .route("/api/settings", get(handlers::get_settings))
        .route("/api/settings/open", post(handlers::open_settings))
        .route("/api/settings/close", post(handlers::close_settings))
        .route("/api/settings/draft", put(handlers::edit_draft))
        .route("/api/settings/save", post(handlers::save_settings))
        .route("/api/settings/clear/request", post(handlers::request_clear))
        .route("/api/settings/clear/cancel", post(handlers::cancel_clear))
        .route("/api/settings/clear/confirm", post(handlers::confirm_clear))
        .with_state(state)
}
