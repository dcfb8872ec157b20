use super::{TeacherId, TimeSlotId};
use serde::{Deserialize, Serialize};

/// Unique on `(teacherId, timeSlotId)`; an absent pair is equivalent to
/// available (spec.md §3) — callers must never synthesize a default `true`
/// row, the absence itself carries that meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherAvailability {
    pub teacher_id: TeacherId,
    pub time_slot_id: TimeSlotId,
    pub is_available: bool,
}
