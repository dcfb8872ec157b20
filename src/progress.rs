//! Progress Broker (PB, spec.md §4.7): a best-effort pub/sub fan-out of one
//! schedule's generation events to any number of subscribers (HTTP
//! long-poll or WebSocket handlers). Grounded on `iqrah-server::websocket`'s
//! `SessionMap`/broadcast usage, generalized from one topic-per-session to
//! one topic-per-schedule.

use crate::types::ScheduleId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

const CHANNEL_CAPACITY: usize = 256;

/// One event in a schedule's generation stream (spec.md §4.7). `Failed` is
/// published exactly once on termination by error *or* cancellation —
/// there is no separate cancelled event on the wire.
#[derive(Debug, Clone)]
pub enum Event {
    Progress {
        schedule_id: ScheduleId,
        current_generation: u32,
        total_generations: u32,
        best_fitness: f64,
        fitness_history: Vec<f64>,
    },
    Complete {
        schedule_id: ScheduleId,
        fitness_score: f64,
        detail_count: usize,
    },
    Failed {
        schedule_id: ScheduleId,
        reason: String,
    },
}

/// Holds one broadcast channel per schedule currently being generated.
/// Channels are created lazily on first subscribe/publish; [`Self::close`]
/// drops the topic once a run finishes.
#[derive(Default)]
pub struct ProgressBroker {
    topics: RwLock<HashMap<ScheduleId, broadcast::Sender<Event>>>,
}

impl ProgressBroker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    async fn sender_for(&self, schedule_id: ScheduleId) -> broadcast::Sender<Event> {
        if let Some(sender) = self.topics.read().await.get(&schedule_id) {
            return sender.clone();
        }
        let mut topics = self.topics.write().await;
        topics
            .entry(schedule_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }

    /// Publish an event for `schedule_id`. Best-effort: if nobody is
    /// subscribed, the event is dropped (spec.md §4.7).
    pub async fn publish(&self, schedule_id: ScheduleId, event: Event) {
        let sender = self.sender_for(schedule_id).await;
        let _ = sender.send(event);
    }

    pub async fn subscribe(&self, schedule_id: ScheduleId) -> broadcast::Receiver<Event> {
        self.sender_for(schedule_id).await.subscribe()
    }

    /// Drop the topic once a run finishes, so long-idle schedules don't
    /// accumulate empty channels.
    pub async fn close(&self, schedule_id: ScheduleId) {
        self.topics.write().await.remove(&schedule_id);
    }
}
