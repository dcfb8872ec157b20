//! REST handlers for the schedule/detail/conflict surface (spec.md §6).
//! Master-data CRUD (departments, classes, teachers, ...) and auth/role
//! gating are explicitly out of scope (spec.md §1 "Out of scope") — this
//! module implements only the schedule-generation surface that sits on
//! THE CORE.

use super::AppState;
use crate::error::{AppError, Result};
use crate::resolver::{self, Proposal};
use crate::types::{GAParams, Schedule, ScheduleConflict, ScheduleDetail, ScheduleDetailId, ScheduleId};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

pub async fn list_schedules(State(state): State<AppState>) -> Result<Json<Vec<Schedule>>> {
    Ok(Json(state.repository.list_schedules().await?))
}

pub async fn get_schedule(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Schedule>> {
    Ok(Json(state.repository.get_schedule(ScheduleId(id)).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub name: String,
    pub academic_year: String,
    pub created_by: i64,
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Json(body): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }
    if !crate::types::is_valid_academic_year(&body.academic_year) {
        return Err(AppError::InvalidInput(format!(
            "academicYear must have the shape YYYY-YYYY or YYYY/YYYY, got '{}'",
            body.academic_year
        )));
    }
    let existing = state.repository.list_schedules().await?;
    let next_id = existing.iter().map(|s| s.id.0).max().unwrap_or(0) + 1;

    let schedule = Schedule {
        id: ScheduleId(next_id),
        name: body.name,
        academic_year: body.academic_year,
        status: crate::types::ScheduleStatus::Draft,
        ga_params: GAParams::default(),
        fitness_score: None,
        created_by: body.created_by,
        metadata: crate::types::ScheduleMetadata::default(),
    };
    let created = state.repository.create_schedule(schedule).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn generate_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(params): Json<GAParams>,
) -> Result<StatusCode> {
    params
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let mut schedule = state.repository.get_schedule(ScheduleId(id)).await?;
    schedule.ga_params = params;
    state.repository.update_schedule(schedule).await?;

    state.orchestrator.start(ScheduleId(id)).await?;
    Ok(StatusCode::ACCEPTED)
}

pub async fn list_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ScheduleDetail>>> {
    Ok(Json(state.repository.list_details(ScheduleId(id)).await?))
}

pub async fn list_conflicts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ScheduleConflict>>> {
    Ok(Json(state.repository.list_conflicts(ScheduleId(id)).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailRequest {
    pub teacher_id: Option<i64>,
    pub room_id: Option<i64>,
    pub time_slot_id: Option<i64>,
}

pub async fn update_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateDetailRequest>,
) -> Result<Json<ScheduleDetail>> {
    let schedules = state.repository.list_schedules().await?;
    let mut detail = find_detail(&state, &schedules, ScheduleDetailId(id)).await?;

    let schedule = state.repository.get_schedule(detail.schedule_id).await?;
    let raw = state.repository.load_resources().await?;
    let pool = crate::resource_loader::load(&schedule.academic_year, &raw)?;

    if let Some(teacher_id) = body.teacher_id {
        let teacher_id = crate::types::TeacherId(teacher_id);
        if !pool.teachers.iter().any(|t| t.id == teacher_id) {
            return Err(AppError::InvalidInput(format!("no active teacher with id {teacher_id}")));
        }
        detail.teacher_id = teacher_id;
    }
    if let Some(room_id) = body.room_id {
        let room_id = crate::types::RoomId(room_id);
        if !pool.rooms.iter().any(|r| r.id == room_id) {
            return Err(AppError::InvalidInput(format!("no active room with id {room_id}")));
        }
        detail.room_id = room_id;
    }
    if let Some(time_slot_id) = body.time_slot_id {
        let time_slot_id = crate::types::TimeSlotId(time_slot_id);
        if !pool.time_slots.iter().any(|t| t.id == time_slot_id) {
            return Err(AppError::InvalidInput(format!("no time slot with id {time_slot_id}")));
        }
        detail.time_slot_id = time_slot_id;
    }
    detail.is_manually_edited = true;

    let updated = state.repository.update_detail(detail).await?;
    refresh_conflicts(&state, updated.schedule_id).await?;
    Ok(Json(updated))
}

pub async fn delete_detail(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    let schedules = state.repository.list_schedules().await?;
    let detail = find_detail(&state, &schedules, ScheduleDetailId(id)).await?;
    state.repository.delete_detail(detail.schedule_id, detail.id).await?;
    refresh_conflicts(&state, detail.schedule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn resolve_conflict(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ScheduleConflict>>> {
    let schedules = state.repository.list_schedules().await?;
    let detail = find_detail(&state, &schedules, ScheduleDetailId(id)).await?;
    let schedule_id = detail.schedule_id;

    let mut details = state.repository.list_details(schedule_id).await?;
    let raw = state.repository.load_resources().await?;
    let schedule = state.repository.get_schedule(schedule_id).await?;
    let pool = crate::resource_loader::load(&schedule.academic_year, &raw)?;

    let conflicts = crate::conflict::detect(&details, &pool);
    let target = conflicts
        .iter()
        .find(|c| c.detail_id_1 == detail.id || c.detail_id_2 == Some(detail.id))
        .ok_or(AppError::NotFound { kind: "schedule_conflict", id })?;

    let demands = crate::demand::expand(&pool);
    let candidates = crate::ga::CandidateSets::build(&pool, &demands);
    // A detail's position in `details` tracks edits/deletions and drifts
    // from its generating demand's position in a freshly-expanded
    // `demands`; match on (class, subject) instead, which is all
    // `CandidateSets` keys off of, so every demand sharing that pair has
    // an identical candidate set.
    let demand_index = demands
        .iter()
        .position(|d| d.class_id == detail.class_id && d.subject_id == detail.subject_id)
        .ok_or(AppError::NotFound { kind: "schedule_detail", id })?;

    let proposals = resolver::propose(target, &details, demand_index, &candidates);
    let proposal: &Proposal = proposals
        .first()
        .ok_or_else(|| AppError::FeasibilityViolated("no proposal available".to_string()))?;

    let remaining = resolver::apply(proposal, &mut details, &pool)?;
    state.repository.replace_details(schedule_id, details).await?;
    state.repository.replace_conflicts(schedule_id, remaining.clone()).await?;
    Ok(Json(remaining))
}

async fn find_detail(
    state: &AppState,
    schedules: &[Schedule],
    detail_id: ScheduleDetailId,
) -> Result<ScheduleDetail> {
    for schedule in schedules {
        let details = state.repository.list_details(schedule.id).await?;
        if let Some(detail) = details.into_iter().find(|d| d.id == detail_id) {
            return Ok(detail);
        }
    }
    Err(AppError::NotFound { kind: "schedule_detail", id: detail_id.0 })
}

async fn refresh_conflicts(state: &AppState, schedule_id: ScheduleId) -> Result<()> {
    let details = state.repository.list_details(schedule_id).await?;
    let raw = state.repository.load_resources().await?;
    let schedule = state.repository.get_schedule(schedule_id).await?;
    let pool = crate::resource_loader::load(&schedule.academic_year, &raw)?;
    let conflicts = crate::conflict::detect(&details, &pool);
    state.repository.replace_conflicts(schedule_id, conflicts).await?;
    Ok(())
}
