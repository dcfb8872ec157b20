//! Resource Loader (RL, spec.md §4.1): collects a consistent, immutable
//! snapshot of all domain entities scoped to one academic year. Grounded on
//! the teacher's `parser::load_input_from_dir`, which plays the same
//! "gather everything the scheduler needs into one bundle" role, but reads
//! from repository-shaped collections instead of a directory of JSON files.

use crate::error::AppError;
use crate::types::{
    Class, Curriculum, Room, RoomDepartment, RoomType, Subject, Teacher, TeacherAvailability,
    TeacherSubject, TimeSlot,
};
use std::collections::HashMap;

/// The full, unscoped contents of the relational store (spec.md §3 tables),
/// as handed back by a [`crate::repository::ResourceRepository`]. The
/// Resource Loader filters this down to one academic year.
#[derive(Debug, Clone, Default)]
pub struct RawResources {
    pub classes: Vec<Class>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    pub rooms: Vec<Room>,
    pub time_slots: Vec<TimeSlot>,
    pub curricula: Vec<Curriculum>,
    pub teacher_subjects: Vec<TeacherSubject>,
    pub teacher_availability: Vec<TeacherAvailability>,
    pub room_departments: Vec<RoomDepartment>,
}

/// An immutable snapshot the GA assumes is never concurrently mutated
/// (spec.md §4.1, §5).
#[derive(Debug, Clone)]
pub struct ResourcePool {
    pub academic_year: String,
    pub classes: Vec<Class>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    pub rooms: Vec<Room>,
    pub time_slots: Vec<TimeSlot>,
    pub curricula: Vec<Curriculum>,
    pub teacher_subjects: Vec<TeacherSubject>,
    pub teacher_availability: Vec<TeacherAvailability>,
    pub room_departments: Vec<RoomDepartment>,
}

impl ResourcePool {
    pub fn subject(&self, id: crate::types::SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn class(&self, id: crate::types::ClassId) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn room_restricted_departments(&self, room_id: crate::types::RoomId) -> Vec<crate::types::DepartmentId> {
        self.room_departments
            .iter()
            .filter(|rd| rd.room_id == room_id)
            .map(|rd| rd.department_id)
            .collect()
    }

    pub fn is_teacher_available(
        &self,
        teacher_id: crate::types::TeacherId,
        time_slot_id: crate::types::TimeSlotId,
    ) -> bool {
        // Absent pair ≡ available (spec.md §3).
        self.teacher_availability
            .iter()
            .find(|a| a.teacher_id == teacher_id && a.time_slot_id == time_slot_id)
            .map(|a| a.is_available)
            .unwrap_or(true)
    }
}

/// Load and validate a [`ResourcePool`] for `academic_year` from `raw`.
/// Fails with [`AppError::InsufficientResources`] per spec.md §4.1.
pub fn load(academic_year: &str, raw: &RawResources) -> Result<ResourcePool, AppError> {
    let classes: Vec<Class> = raw
        .classes
        .iter()
        .filter(|c| c.is_active && c.academic_year == academic_year)
        .cloned()
        .collect();

    if classes.is_empty() {
        return Err(AppError::InsufficientResources {
            missing: format!("no active classes for academic year {academic_year}"),
        });
    }

    for class in &classes {
        if !crate::types::is_valid_academic_year(&class.academic_year) {
            return Err(AppError::InvalidInput(format!(
                "class {} has malformed academicYear '{}'",
                class.id, class.academic_year
            )));
        }
    }

    let teachers: Vec<Teacher> = raw.teachers.iter().filter(|t| t.is_active).cloned().collect();
    let subjects = raw.subjects.clone();
    let rooms: Vec<Room> = raw.rooms.iter().filter(|r| r.is_active).cloned().collect();
    let time_slots = raw.time_slots.clone();

    if time_slots.is_empty() {
        return Err(AppError::InsufficientResources {
            missing: "no time slots defined".to_string(),
        });
    }

    for slot in &time_slots {
        if !slot.day_in_range() || !slot.slot_in_range() || !slot.times_valid() {
            return Err(AppError::InvalidInput(format!(
                "time slot {} has an out-of-range day/slot number or endTime <= startTime",
                slot.id
            )));
        }
    }

    let curricula: Vec<Curriculum> = raw
        .curricula
        .iter()
        .filter(|c| c.academic_year == academic_year)
        .cloned()
        .collect();

    for curriculum in &curricula {
        if !curriculum.hours_in_range() {
            return Err(AppError::InvalidInput(format!(
                "curriculum {} has hoursPerWeek {} out of range [1, 10]",
                curriculum.id, curriculum.hours_per_week
            )));
        }
    }

    let teacher_subjects: Vec<TeacherSubject> = raw
        .teacher_subjects
        .iter()
        .filter(|ts| ts.academic_year == academic_year)
        .cloned()
        .collect();

    let teacher_availability = raw.teacher_availability.clone();
    let room_departments = raw.room_departments.clone();

    // A required subject must have at least one active room of its type.
    let rooms_by_type: HashMap<RoomType, usize> = rooms.iter().fold(HashMap::new(), |mut acc, r| {
        *acc.entry(r.room_type).or_insert(0) += 1;
        acc
    });

    let subjects_by_id: HashMap<_, _> = subjects.iter().map(|s| (s.id, s)).collect();

    for curriculum in &curricula {
        let Some(subject) = subjects_by_id.get(&curriculum.subject_id) else {
            continue;
        };
        if rooms_by_type.get(&subject.room_type).copied().unwrap_or(0) == 0 {
            return Err(AppError::InsufficientResources {
                missing: format!("{}-room", subject.room_type),
            });
        }
    }

    // Every curriculum row must have at least one qualified, active
    // teacher — matching the filter `CandidateSets` applies, so a subject
    // staffed only by an inactive teacher fails fast here instead of
    // silently reaching the GA with an empty candidate set.
    let active_teacher_ids: std::collections::HashSet<_> = teachers.iter().map(|t| t.id).collect();
    let qualified_subjects: std::collections::HashSet<_> = teacher_subjects
        .iter()
        .filter(|ts| active_teacher_ids.contains(&ts.teacher_id))
        .map(|ts| ts.subject_id)
        .collect();

    for curriculum in &curricula {
        if !qualified_subjects.contains(&curriculum.subject_id) {
            return Err(AppError::InsufficientResources {
                missing: format!("teacher-for-subject-{}", curriculum.subject_id),
            });
        }
    }

    Ok(ResourcePool {
        academic_year: academic_year.to_string(),
        classes,
        teachers,
        subjects,
        rooms,
        time_slots,
        curricula,
        teacher_subjects,
        teacher_availability,
        room_departments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn theory_subject(id: i64) -> Subject {
        Subject {
            id: SubjectId(id),
            code: format!("S{id}"),
            name: "Subject".to_string(),
            grade_level: None,
            department_id: Some(DepartmentId(1)),
            room_type: RoomType::Theory,
            is_compulsory: true,
        }
    }

    fn base_raw() -> RawResources {
        RawResources {
            classes: vec![Class {
                id: ClassId(1),
                name: "X".to_string(),
                grade_level: GradeLevel::new(10).unwrap(),
                department_id: DepartmentId(1),
                academic_year: "2025-2026".to_string(),
                is_active: true,
            }],
            teachers: vec![Teacher {
                id: TeacherId(1),
                code: "T1".to_string(),
                name: "Teacher".to_string(),
                is_active: true,
            }],
            subjects: vec![theory_subject(1)],
            rooms: vec![Room {
                id: RoomId(1),
                code: "R1".to_string(),
                name: "Room 1".to_string(),
                room_type: RoomType::Theory,
                capacity: 30,
                is_active: true,
            }],
            time_slots: vec![TimeSlot {
                id: TimeSlotId(1),
                day_of_week: 1,
                slot_number: 1,
                start_time: "08:00".to_string(),
                end_time: "08:45".to_string(),
            }],
            curricula: vec![Curriculum {
                id: CurriculumId(1),
                subject_id: SubjectId(1),
                department_id: DepartmentId(1),
                grade_level: 10,
                hours_per_week: 2,
                academic_year: "2025-2026".to_string(),
            }],
            teacher_subjects: vec![TeacherSubject {
                teacher_id: TeacherId(1),
                subject_id: SubjectId(1),
                academic_year: "2025-2026".to_string(),
            }],
            teacher_availability: vec![],
            room_departments: vec![],
        }
    }

    #[test]
    fn loads_a_feasible_pool() {
        let pool = load("2025-2026", &base_raw()).unwrap();
        assert_eq!(pool.classes.len(), 1);
        assert_eq!(pool.curricula.len(), 1);
    }

    #[test]
    fn fails_with_no_classes() {
        let mut raw = base_raw();
        raw.classes.clear();
        let err = load("2025-2026", &raw).unwrap_err();
        assert!(matches!(err, AppError::InsufficientResources { .. }));
    }

    #[test]
    fn fails_with_no_time_slots() {
        let mut raw = base_raw();
        raw.time_slots.clear();
        let err = load("2025-2026", &raw).unwrap_err();
        assert!(matches!(err, AppError::InsufficientResources { .. }));
    }

    #[test]
    fn fails_when_required_room_type_missing() {
        let mut raw = base_raw();
        raw.subjects[0].room_type = RoomType::Practicum;
        let err = load("2025-2026", &raw).unwrap_err();
        match err {
            AppError::InsufficientResources { missing } => {
                assert_eq!(missing, "practicum-room");
            }
            _ => panic!("expected InsufficientResources"),
        }
    }

    #[test]
    fn fails_with_malformed_academic_year() {
        let mut raw = base_raw();
        raw.classes[0].academic_year = "2025_2026".to_string();
        let err = load("2025_2026", &raw).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn fails_with_out_of_range_time_slot() {
        let mut raw = base_raw();
        raw.time_slots[0].slot_number = 11;
        let err = load("2025-2026", &raw).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn fails_when_end_time_does_not_exceed_start_time() {
        let mut raw = base_raw();
        raw.time_slots[0].end_time = "08:00".to_string();
        let err = load("2025-2026", &raw).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn fails_with_out_of_range_curriculum_hours() {
        let mut raw = base_raw();
        raw.curricula[0].hours_per_week = 11;
        let err = load("2025-2026", &raw).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn fails_when_the_only_qualified_teacher_is_inactive() {
        let mut raw = base_raw();
        raw.teachers[0].is_active = false;
        let err = load("2025-2026", &raw).unwrap_err();
        match err {
            AppError::InsufficientResources { missing } => {
                assert_eq!(missing, "teacher-for-subject-1");
            }
            _ => panic!("expected InsufficientResources"),
        }
    }

    #[test]
    fn fails_when_no_qualified_teacher() {
        let mut raw = base_raw();
        raw.teacher_subjects.clear();
        let err = load("2025-2026", &raw).unwrap_err();
        match err {
            AppError::InsufficientResources { missing } => {
                assert_eq!(missing, "teacher-for-subject-1");
            }
            _ => panic!("expected InsufficientResources"),
        }
    }
}
