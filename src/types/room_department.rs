use super::{DepartmentId, RoomId};
use serde::{Deserialize, Serialize};

/// A room restricted to a set of departments. If a room has zero entries in
/// this table it is usable by every department (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDepartment {
    pub room_id: RoomId,
    pub department_id: DepartmentId,
}
