use super::{RoomId, RoomType};
use serde::{Deserialize, Serialize};

/// A physical room. Invariant: `code` and `name` are unique, `capacity >= 1`
/// (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub code: String,
    pub name: String,
    pub room_type: RoomType,
    pub capacity: u32,
    pub is_active: bool,
}
