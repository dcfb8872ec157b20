use super::TimeSlotId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A weekly recurring period. Invariant: `dayOfWeek ∈ [1,5]`,
/// `slotNumber ∈ [1,10]`, `endTime > startTime`, unique on
/// `(dayOfWeek, slotNumber)` (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub day_of_week: u8,
    pub slot_number: u8,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlot {
    pub fn day_in_range(&self) -> bool {
        (1..=5).contains(&self.day_of_week)
    }

    pub fn slot_in_range(&self) -> bool {
        (1..=10).contains(&self.slot_number)
    }

    /// `endTime > startTime` (spec.md §3). Times are `HH:MM` strings, so a
    /// plain lexicographic comparison is correct as long as both are
    /// zero-padded to the same width.
    pub fn times_valid(&self) -> bool {
        self.end_time > self.start_time
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}S{}", self.day_of_week, self.slot_number)
    }
}
