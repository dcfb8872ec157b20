use super::{DepartmentId, RoomType, SubjectId};
use serde::{Deserialize, Serialize};

/// A subject offered at the school. `department_id = None` marks a
/// "generic" subject (spec.md §3) — it is only schedulable once curriculum
/// ties it to a department via an explicit row (see [`super::Curriculum`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub code: String,
    pub name: String,
    pub grade_level: Option<u8>,
    pub department_id: Option<DepartmentId>,
    pub room_type: RoomType,
    pub is_compulsory: bool,
}
