//! `/ws` progress channel (spec.md §6, §4.7). Grounded on
//! `iqrah-server::websocket`'s `ws_handler`/`handle_socket` split and its
//! `{type, data}` envelope convention, generalized from exercise-session
//! events to schedule-generation events.

use super::AppState;
use crate::progress::Event as BrokerEvent;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    #[serde(rename = "scheduleId")]
    schedule_id: Option<i64>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.schedule_id))
}

/// Client-sent control frames (spec.md §6's `ping`/`pong` round trip).
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ClientMessage {
    Ping,
}

async fn handle_socket(mut socket: WebSocket, state: AppState, schedule_id: Option<i64>) {
    if socket
        .send(Message::Text(json!({"type": "connection", "data": {"status": "connected"}}).to_string()))
        .await
        .is_err()
    {
        return;
    }

    let Some(schedule_id) = schedule_id else {
        return;
    };
    let schedule_id = crate::types::ScheduleId(schedule_id);
    let mut events = state.broker.subscribe(schedule_id).await;

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Ok(ClientMessage::Ping) = serde_json::from_str(&text) {
                            if socket.send(Message::Text(json!({"type": "pong", "data": {}}).to_string())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if socket.send(Message::Text(to_wire(event))).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    // A lagging subscriber missed events (spec.md §4.7 "best-effort,
                    // at-most-once"); keep going from the next available event.
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressData {
    schedule_id: i64,
    current_generation: u32,
    total_generations: u32,
    best_fitness: f64,
    fitness_history: Vec<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteData {
    schedule_id: i64,
    fitness_score: f64,
    detail_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailedData {
    schedule_id: i64,
    reason: String,
}

fn to_wire(event: BrokerEvent) -> String {
    match event {
        BrokerEvent::Progress { schedule_id, current_generation, total_generations, best_fitness, fitness_history } => {
            json!({
                "type": "scheduleGenerationProgress",
                "data": ProgressData {
                    schedule_id: schedule_id.0,
                    current_generation,
                    total_generations,
                    best_fitness,
                    fitness_history,
                },
            })
            .to_string()
        }
        BrokerEvent::Complete { schedule_id, fitness_score, detail_count } => json!({
            "type": "scheduleGenerationComplete",
            "data": CompleteData { schedule_id: schedule_id.0, fitness_score, detail_count },
        })
        .to_string(),
        // Not one of spec.md §6's four listed wire types — cancellation and
        // runtime failure both need to reach the client, so this adds a
        // fifth `type` rather than silently dropping `Failed` (see DESIGN.md).
        BrokerEvent::Failed { schedule_id, reason } => json!({
            "type": "scheduleGenerationFailed",
            "data": FailedData { schedule_id: schedule_id.0, reason },
        })
        .to_string(),
    }
}
