//! In-memory `ScheduleRepository` (spec.md §4.6), used by the demo CLI and
//! by integration tests. Grounded on `iqrah-core`'s in-memory adapters,
//! which hold their state behind a `tokio::sync::RwLock<HashMap<..>>` and
//! implement the same port trait as a real store.

use super::ScheduleRepository;
use crate::error::AppError;
use crate::resource_loader::RawResources;
use crate::types::{Schedule, ScheduleConflict, ScheduleDetail, ScheduleDetailId, ScheduleId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Storage {
    schedules: HashMap<ScheduleId, Schedule>,
    details: HashMap<ScheduleId, Vec<ScheduleDetail>>,
    conflicts: HashMap<ScheduleId, Vec<ScheduleConflict>>,
}

/// Holds `resources` fixed at construction time — the demo/test store has
/// no separate resource-admin surface, only schedules.
pub struct InMemoryScheduleRepository {
    resources: RawResources,
    storage: RwLock<Storage>,
}

impl InMemoryScheduleRepository {
    pub fn new(resources: RawResources) -> Self {
        Self {
            resources,
            storage: RwLock::new(Storage::default()),
        }
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn list_schedules(&self) -> Result<Vec<Schedule>, AppError> {
        Ok(self.storage.read().await.schedules.values().cloned().collect())
    }

    async fn get_schedule(&self, id: ScheduleId) -> Result<Schedule, AppError> {
        self.storage
            .read()
            .await
            .schedules
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound { kind: "schedule", id: id.0 })
    }

    async fn create_schedule(&self, schedule: Schedule) -> Result<Schedule, AppError> {
        let mut storage = self.storage.write().await;
        storage.schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule(&self, schedule: Schedule) -> Result<Schedule, AppError> {
        let mut storage = self.storage.write().await;
        if !storage.schedules.contains_key(&schedule.id) {
            return Err(AppError::NotFound { kind: "schedule", id: schedule.id.0 });
        }
        storage.schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn delete_schedule(&self, id: ScheduleId) -> Result<(), AppError> {
        let mut storage = self.storage.write().await;
        storage.schedules.remove(&id);
        storage.details.remove(&id);
        storage.conflicts.remove(&id);
        Ok(())
    }

    async fn list_details(&self, schedule_id: ScheduleId) -> Result<Vec<ScheduleDetail>, AppError> {
        Ok(self
            .storage
            .read()
            .await
            .details
            .get(&schedule_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_details(
        &self,
        schedule_id: ScheduleId,
        details: Vec<ScheduleDetail>,
    ) -> Result<(), AppError> {
        self.storage.write().await.details.insert(schedule_id, details);
        Ok(())
    }

    async fn update_detail(&self, detail: ScheduleDetail) -> Result<ScheduleDetail, AppError> {
        let mut storage = self.storage.write().await;
        let bucket = storage.details.entry(detail.schedule_id).or_default();
        match bucket.iter_mut().find(|d| d.id == detail.id) {
            Some(existing) => {
                *existing = detail.clone();
                Ok(detail)
            }
            None => Err(AppError::NotFound { kind: "schedule_detail", id: detail.id.0 }),
        }
    }

    async fn create_detail(&self, detail: ScheduleDetail) -> Result<ScheduleDetail, AppError> {
        let mut storage = self.storage.write().await;
        storage.details.entry(detail.schedule_id).or_default().push(detail.clone());
        Ok(detail)
    }

    async fn delete_detail(&self, schedule_id: ScheduleId, id: ScheduleDetailId) -> Result<(), AppError> {
        let mut storage = self.storage.write().await;
        let bucket = storage.details.entry(schedule_id).or_default();
        let before = bucket.len();
        bucket.retain(|d| d.id != id);
        if bucket.len() == before {
            return Err(AppError::NotFound { kind: "schedule_detail", id: id.0 });
        }
        Ok(())
    }

    async fn list_conflicts(&self, schedule_id: ScheduleId) -> Result<Vec<ScheduleConflict>, AppError> {
        Ok(self
            .storage
            .read()
            .await
            .conflicts
            .get(&schedule_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_conflicts(
        &self,
        schedule_id: ScheduleId,
        conflicts: Vec<ScheduleConflict>,
    ) -> Result<(), AppError> {
        self.storage.write().await.conflicts.insert(schedule_id, conflicts);
        Ok(())
    }

    async fn load_resources(&self) -> Result<RawResources, AppError> {
        Ok(self.resources.clone())
    }
}
