//! Candidate sets (spec.md §4.3.2), precomputed once per GA run.

use crate::demand::Demand;
use crate::resource_loader::ResourcePool;
use crate::types::{RoomId, TeacherId, TimeSlotId};

/// The legal teacher/room choices for one demand position. Empty vectors
/// are legal — they signal that initialization and mutation must fall back
/// to the sentinel id (spec.md §4.3.2).
#[derive(Debug, Clone, Default)]
pub struct DemandCandidates {
    pub teachers: Vec<TeacherId>,
    pub rooms: Vec<RoomId>,
}

pub struct CandidateSets {
    pub per_demand: Vec<DemandCandidates>,
    pub all_time_slots: Vec<TimeSlotId>,
}

impl CandidateSets {
    pub fn build(pool: &ResourcePool, demands: &[Demand]) -> Self {
        let all_time_slots = pool.time_slots.iter().map(|t| t.id).collect();

        let per_demand = demands
            .iter()
            .map(|demand| {
                let Some(subject) = pool.subject(demand.subject_id) else {
                    return DemandCandidates::default();
                };

                let teachers = pool
                    .teacher_subjects
                    .iter()
                    .filter(|ts| ts.subject_id == demand.subject_id)
                    .filter(|ts| pool.teachers.iter().any(|t| t.id == ts.teacher_id))
                    .map(|ts| ts.teacher_id)
                    .collect();

                let class_department = pool.class(demand.class_id).map(|c| c.department_id);

                let rooms = pool
                    .rooms
                    .iter()
                    .filter(|r| r.room_type == subject.room_type)
                    .filter(|r| {
                        let restricted = pool.room_restricted_departments(r.id);
                        restricted.is_empty()
                            || class_department
                                .map(|dept| restricted.contains(&dept))
                                .unwrap_or(false)
                    })
                    .map(|r| r.id)
                    .collect();

                DemandCandidates { teachers, rooms }
            })
            .collect();

        Self {
            per_demand,
            all_time_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_loader::RawResources;
    use crate::types::*;

    fn raw_with_restricted_room() -> RawResources {
        RawResources {
            classes: vec![Class {
                id: ClassId(1),
                name: "X".into(),
                grade_level: GradeLevel::new(10).unwrap(),
                department_id: DepartmentId(1),
                academic_year: "2025-2026".into(),
                is_active: true,
            }],
            teachers: vec![Teacher {
                id: TeacherId(1),
                code: "T1".into(),
                name: "T".into(),
                is_active: true,
            }],
            subjects: vec![Subject {
                id: SubjectId(1),
                code: "S1".into(),
                name: "S".into(),
                grade_level: None,
                department_id: Some(DepartmentId(1)),
                room_type: RoomType::Theory,
                is_compulsory: true,
            }],
            rooms: vec![
                Room {
                    id: RoomId(1),
                    code: "R1".into(),
                    name: "R1".into(),
                    room_type: RoomType::Theory,
                    capacity: 30,
                    is_active: true,
                },
                Room {
                    id: RoomId(2),
                    code: "R2".into(),
                    name: "R2".into(),
                    room_type: RoomType::Theory,
                    capacity: 30,
                    is_active: true,
                },
            ],
            time_slots: vec![TimeSlot {
                id: TimeSlotId(1),
                day_of_week: 1,
                slot_number: 1,
                start_time: "08:00".into(),
                end_time: "08:45".into(),
            }],
            curricula: vec![Curriculum {
                id: CurriculumId(1),
                subject_id: SubjectId(1),
                department_id: DepartmentId(1),
                grade_level: 10,
                hours_per_week: 1,
                academic_year: "2025-2026".into(),
            }],
            teacher_subjects: vec![TeacherSubject {
                teacher_id: TeacherId(1),
                subject_id: SubjectId(1),
                academic_year: "2025-2026".into(),
            }],
            teacher_availability: vec![],
            room_departments: vec![RoomDepartment {
                room_id: RoomId(2),
                department_id: DepartmentId(99),
            }],
        }
    }

    #[test]
    fn excludes_room_restricted_to_other_department() {
        let raw = raw_with_restricted_room();
        let pool = crate::resource_loader::load("2025-2026", &raw).unwrap();
        let demands = crate::demand::expand(&pool);
        let candidates = CandidateSets::build(&pool, &demands);
        assert_eq!(candidates.per_demand[0].rooms, vec![RoomId(1)]);
    }
}
