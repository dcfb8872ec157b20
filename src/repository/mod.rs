//! Schedule Repository contract (SR, spec.md §4.6). Grounded on
//! `iqrah-core::ports` — async trait objects behind `Arc<dyn Trait>`,
//! exactly the shape this module's `ScheduleRepository` follows, with a
//! `memory` implementation standing in for a real persistence layer.

mod memory;

pub use memory::InMemoryScheduleRepository;

use crate::error::AppError;
use crate::resource_loader::RawResources;
use crate::types::{Schedule, ScheduleConflict, ScheduleDetail, ScheduleId};
use async_trait::async_trait;

/// Persists schedules, their details and derived conflicts, and hands back
/// the raw resource tables the Resource Loader needs. All writes to a
/// schedule's details are atomic: either every detail in the batch lands,
/// or none does (spec.md §4.6).
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn list_schedules(&self) -> Result<Vec<Schedule>, AppError>;
    async fn get_schedule(&self, id: ScheduleId) -> Result<Schedule, AppError>;
    async fn create_schedule(&self, schedule: Schedule) -> Result<Schedule, AppError>;
    async fn update_schedule(&self, schedule: Schedule) -> Result<Schedule, AppError>;
    async fn delete_schedule(&self, id: ScheduleId) -> Result<(), AppError>;

    async fn list_details(&self, schedule_id: ScheduleId) -> Result<Vec<ScheduleDetail>, AppError>;
    /// Replace all details for `schedule_id` in one atomic batch.
    async fn replace_details(
        &self,
        schedule_id: ScheduleId,
        details: Vec<ScheduleDetail>,
    ) -> Result<(), AppError>;
    async fn update_detail(&self, detail: ScheduleDetail) -> Result<ScheduleDetail, AppError>;
    async fn create_detail(&self, detail: ScheduleDetail) -> Result<ScheduleDetail, AppError>;
    async fn delete_detail(&self, schedule_id: ScheduleId, id: crate::types::ScheduleDetailId) -> Result<(), AppError>;

    async fn list_conflicts(&self, schedule_id: ScheduleId) -> Result<Vec<ScheduleConflict>, AppError>;
    async fn replace_conflicts(
        &self,
        schedule_id: ScheduleId,
        conflicts: Vec<ScheduleConflict>,
    ) -> Result<(), AppError>;

    /// The full resource snapshot the Resource Loader scopes to one
    /// academic year (spec.md §4.1).
    async fn load_resources(&self) -> Result<RawResources, AppError>;
}
