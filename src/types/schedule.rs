use super::{
    ClassId, RoomId, ScheduleConflictId, ScheduleDetailId, ScheduleId, SubjectId, TeacherId,
    TimeSlotId,
};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a [`Schedule`] (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Draft,
    Active,
    Archived,
}

/// Bookkeeping attached to a generated schedule; not part of the
/// distilled spec but needed to report how a schedule was produced,
/// mirrored on the teacher's `ScheduleMetadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetadata {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub solve_time_ms: u64,
    pub generations_run: u32,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            generated_at: chrono::Utc::now(),
            solve_time_ms: 0,
            generations_run: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    pub academic_year: String,
    pub status: ScheduleStatus,
    pub ga_params: super::GAParams,
    pub fitness_score: Option<f64>,
    pub created_by: i64,
    pub metadata: ScheduleMetadata,
}

/// One lesson assignment: class × subject × teacher × room × time slot.
/// Invariant: all FKs resolve; `(scheduleId, classId, timeSlotId)` is unique
/// when `isOverride = false` (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetail {
    pub id: ScheduleDetailId,
    pub schedule_id: ScheduleId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub time_slot_id: TimeSlotId,
    pub is_manually_edited: bool,
    pub is_override: bool,
}

/// Kind of collision detected between two (or, for room-type, one) details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    Teacher,
    Class,
    Room,
    RoomType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Hard,
    Soft,
}

/// A derived, cacheable conflict view — never authored directly by a user
/// (spec.md §3 "Lifecycle"). Stable ids are derived from sorted
/// `(detailId1, detailId2, type)` so repeated detection runs are
/// idempotent (see [`crate::conflict::detect`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConflict {
    pub id: ScheduleConflictId,
    pub schedule_id: ScheduleId,
    pub conflict_type: ConflictType,
    pub detail_id_1: ScheduleDetailId,
    pub detail_id_2: Option<ScheduleDetailId>,
    pub severity: ConflictSeverity,
    pub description: String,
}
