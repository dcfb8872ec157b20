//! Resolver (RS, spec.md §4.5): proposes a fix for one conflict and applies
//! it to a schedule's details, re-validating the result. Grounded on the
//! teacher's `validator` module's severity/violation vocabulary, extended
//! here with proposal generation and application rather than pure
//! diagnosis.

use crate::conflict;
use crate::error::AppError;
use crate::ga::CandidateSets;
use crate::resource_loader::ResourcePool;
use crate::types::{ConflictType, RoomId, ScheduleConflict, ScheduleDetail, TeacherId, TimeSlotId};

/// A single proposed change to one [`ScheduleDetail`], ranked by how the
/// Resolver tries them (spec.md §4.5: ChangeRoom / ChangeTime /
/// ChangeTeacher, then RemoveLesson as the last resort).
#[derive(Debug, Clone, PartialEq)]
pub enum Proposal {
    ChangeRoom { detail_id: crate::types::ScheduleDetailId, room_id: RoomId },
    ChangeTime { detail_id: crate::types::ScheduleDetailId, time_slot_id: TimeSlotId },
    ChangeTeacher { detail_id: crate::types::ScheduleDetailId, teacher_id: TeacherId },
    RemoveLesson { detail_id: crate::types::ScheduleDetailId },
}

/// Is `teacher_id` free at `time_slot_id`, ignoring `excluding` itself?
fn teacher_free_at(details: &[ScheduleDetail], teacher_id: TeacherId, time_slot_id: TimeSlotId, excluding: crate::types::ScheduleDetailId) -> bool {
    !details
        .iter()
        .any(|d| d.id != excluding && d.teacher_id == teacher_id && d.time_slot_id == time_slot_id)
}

/// Is `room_id` free at `time_slot_id`, ignoring `excluding` itself?
fn room_free_at(details: &[ScheduleDetail], room_id: RoomId, time_slot_id: TimeSlotId, excluding: crate::types::ScheduleDetailId) -> bool {
    !details
        .iter()
        .any(|d| d.id != excluding && d.room_id == room_id && d.time_slot_id == time_slot_id)
}

/// Is `class_id` free at `time_slot_id`, ignoring `excluding` itself?
fn class_free_at(details: &[ScheduleDetail], class_id: crate::types::ClassId, time_slot_id: TimeSlotId, excluding: crate::types::ScheduleDetailId) -> bool {
    !details
        .iter()
        .any(|d| d.id != excluding && d.class_id == class_id && d.time_slot_id == time_slot_id)
}

/// Propose resolutions for `target`, one of the two details in `conflict`
/// (or the only one, for a `RoomType` conflict), as an ordered list of
/// candidates to try (spec.md §4.5). Every reassignment is cross-checked
/// against `details` so a proposal is never made unless the alternative is
/// actually free; `RemoveLesson` is always appended last as the final
/// fallback.
pub fn propose(
    target_conflict: &ScheduleConflict,
    details: &[ScheduleDetail],
    demand_index: usize,
    candidates: &CandidateSets,
) -> Vec<Proposal> {
    let mut proposals = Vec::new();

    let detail = match details.iter().find(|d| d.id == target_conflict.detail_id_1) {
        Some(d) => d,
        None => return proposals,
    };
    let demand_candidates = match candidates.per_demand.get(demand_index) {
        Some(dc) => dc,
        None => {
            proposals.push(Proposal::RemoveLesson { detail_id: detail.id });
            return proposals;
        }
    };

    match target_conflict.conflict_type {
        ConflictType::Room | ConflictType::RoomType => {
            // Not used in that time slot by any other detail (spec.md §4.5).
            for &room_id in &demand_candidates.rooms {
                if room_id != detail.room_id && room_free_at(details, room_id, detail.time_slot_id, detail.id) {
                    proposals.push(Proposal::ChangeRoom { detail_id: detail.id, room_id });
                }
            }
        }
        ConflictType::Teacher => {
            // Free in that time slot.
            for &teacher_id in &demand_candidates.teachers {
                if teacher_id != detail.teacher_id && teacher_free_at(details, teacher_id, detail.time_slot_id, detail.id) {
                    proposals.push(Proposal::ChangeTeacher { detail_id: detail.id, teacher_id });
                }
            }
            // Moving the lesson to a time slot where both teacher and room
            // are free.
            for &time_slot_id in &candidates.all_time_slots {
                if time_slot_id != detail.time_slot_id
                    && teacher_free_at(details, detail.teacher_id, time_slot_id, detail.id)
                    && room_free_at(details, detail.room_id, time_slot_id, detail.id)
                {
                    proposals.push(Proposal::ChangeTime { detail_id: detail.id, time_slot_id });
                }
            }
        }
        ConflictType::Class => {
            // Free for the same (teacher, room, class) trio.
            for &time_slot_id in &candidates.all_time_slots {
                if time_slot_id != detail.time_slot_id
                    && class_free_at(details, detail.class_id, time_slot_id, detail.id)
                    && teacher_free_at(details, detail.teacher_id, time_slot_id, detail.id)
                    && room_free_at(details, detail.room_id, time_slot_id, detail.id)
                {
                    proposals.push(Proposal::ChangeTime { detail_id: detail.id, time_slot_id });
                }
            }
        }
    }

    proposals.push(Proposal::RemoveLesson { detail_id: detail.id });
    proposals
}

/// Apply `proposal` to `details`, then re-detect conflicts against `pool`.
/// Fails with [`AppError::FeasibilityViolated`] if the proposal would leave
/// behind a hard conflict it didn't eliminate (spec.md §4.5).
pub fn apply(
    proposal: &Proposal,
    details: &mut Vec<ScheduleDetail>,
    pool: &ResourcePool,
) -> Result<Vec<ScheduleConflict>, AppError> {
    let before = conflict::detect(details, pool);

    match proposal {
        Proposal::ChangeRoom { detail_id, room_id } => {
            if let Some(d) = details.iter_mut().find(|d| d.id == *detail_id) {
                d.room_id = *room_id;
                d.is_manually_edited = true;
            }
        }
        Proposal::ChangeTime { detail_id, time_slot_id } => {
            if let Some(d) = details.iter_mut().find(|d| d.id == *detail_id) {
                d.time_slot_id = *time_slot_id;
                d.is_manually_edited = true;
            }
        }
        Proposal::ChangeTeacher { detail_id, teacher_id } => {
            if let Some(d) = details.iter_mut().find(|d| d.id == *detail_id) {
                d.teacher_id = *teacher_id;
                d.is_manually_edited = true;
            }
        }
        Proposal::RemoveLesson { detail_id } => {
            details.retain(|d| d.id != *detail_id);
        }
    }

    let after = conflict::detect(details, pool);

    let unresolved_hard_growth = after
        .iter()
        .filter(|c| c.severity == crate::types::ConflictSeverity::Hard)
        .count()
        > before
            .iter()
            .filter(|c| c.severity == crate::types::ConflictSeverity::Hard)
            .count();

    if unresolved_hard_growth {
        return Err(AppError::FeasibilityViolated(
            "proposal introduced new hard conflicts".to_string(),
        ));
    }

    Ok(after)
}
