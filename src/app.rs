use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/inputs", post(handlers::update_inputs))
        .route("/api/checkin", post(handlers::complete_checkin))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/report", post(handlers::create_report))
        .route("/api/chat", post(handlers::chat))
        .route("/api/calendar.ics", get(handlers::export_calendar))
        .route("/api/weather", get(handlers::get_weather))
        .route("/api/dog", get(handlers::get_dog))
        .with_state(state)
}
