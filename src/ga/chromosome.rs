use crate::types::{RoomId, TeacherId, TimeSlotId};

/// One gene: the (teacher, room, time slot) assigned at a fixed demand
/// position. `classId`/`subjectId` are not stored here — they are implied
/// by the gene's position in the parent [`Chromosome`] against the
/// [`crate::demand::Demand`] list it was built from (spec.md §4.3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gene {
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub time_slot_id: TimeSlotId,
}

/// An ordered sequence of genes in one-to-one positional correspondence
/// with a Demand list. Length is invariant across all GA operators
/// (spec.md §4.3.1).
pub type Chromosome = Vec<Gene>;
