//! HTTP + WebSocket surface (spec.md §6). Grounded on
//! `iqrah-server::main`'s `AppState`/router wiring: one state struct of
//! `Arc<dyn Trait>`/`Arc<_>` fields, a `Router` built with `.route(...)`
//! and `.merge(...)`, `CorsLayer` and `TraceLayer` applied once at the top.

mod http;
mod websocket;

use crate::orchestrator::Orchestrator;
use crate::progress::ProgressBroker;
use crate::repository::ScheduleRepository;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ScheduleRepository>,
    pub orchestrator: Arc<Orchestrator>,
    pub broker: Arc<ProgressBroker>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/schedules", get(http::list_schedules).post(http::create_schedule))
        .route("/api/schedules/:id", get(http::get_schedule))
        .route("/api/schedules/:id/generate", post(http::generate_schedule))
        .route("/api/schedules/:id/details", get(http::list_details))
        .route("/api/schedules/:id/conflicts", get(http::list_conflicts))
        .route(
            "/api/schedule-details/:id",
            put(http::update_detail).delete(http::delete_detail),
        )
        .route(
            "/api/schedule-details/:id/resolve-conflict",
            put(http::resolve_conflict),
        )
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
