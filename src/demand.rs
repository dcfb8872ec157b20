//! Demand Expander (DE, spec.md §4.2): turns curriculum rows into one
//! "gene site" per required weekly hour. Grounded on the teacher's
//! `scheduler::section_creator::create_sections`, which performs the
//! analogous "one row in, N slots out" expansion for course sections.

use crate::resource_loader::ResourcePool;
use crate::types::{ClassId, SubjectId};

/// A (class, subject) pair counted once per weekly required hour — one gene
/// site in the GA chromosome (spec.md GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demand {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
}

/// Expand curriculum into the flat demand list. For each class, curriculum
/// is looked up by `(class.department_id, class.grade_level, pool.year)`;
/// each matching row emits `hours_per_week` demand entries. Subjects absent
/// from curriculum are silently ignored (spec.md §4.2); a curriculum row
/// whose `(department, grade)` matches no class is also silently skipped —
/// logged, not failed (spec.md §9 Open Questions).
pub fn expand(pool: &ResourcePool) -> Vec<Demand> {
    let mut demands = Vec::new();

    for class in &pool.classes {
        let rows = pool.curricula.iter().filter(|c| {
            c.department_id == class.department_id && c.grade_level == class.grade_level.get()
        });

        for row in rows {
            for _ in 0..row.hours_per_week {
                demands.push(Demand {
                    class_id: class.id,
                    subject_id: row.subject_id,
                });
            }
        }
    }

    let matched_keys: std::collections::HashSet<(i64, u8)> = pool
        .classes
        .iter()
        .map(|c| (c.department_id.0, c.grade_level.get()))
        .collect();
    for row in &pool.curricula {
        if !matched_keys.contains(&(row.department_id.0, row.grade_level)) {
            tracing::warn!(
                curriculum_id = row.id.0,
                department_id = row.department_id.0,
                grade_level = row.grade_level,
                "curriculum row matches no class in this academic year"
            );
        }
    }

    demands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_loader::RawResources;
    use crate::types::*;

    fn pool_with_hours(hours: u8) -> ResourcePool {
        let raw = RawResources {
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
            subjects: vec![Subject {
                id: SubjectId(1),
                code: "S1".to_string(),
                name: "Subject".to_string(),
                grade_level: None,
                department_id: Some(DepartmentId(1)),
                room_type: RoomType::Theory,
                is_compulsory: true,
            }],
            rooms: vec![Room {
                id: RoomId(1),
                code: "R1".to_string(),
                name: "Room".to_string(),
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
                hours_per_week: hours,
                academic_year: "2025-2026".to_string(),
            }],
            teacher_subjects: vec![TeacherSubject {
                teacher_id: TeacherId(1),
                subject_id: SubjectId(1),
                academic_year: "2025-2026".to_string(),
            }],
            teacher_availability: vec![],
            room_departments: vec![],
        };
        crate::resource_loader::load("2025-2026", &raw).unwrap()
    }

    #[test]
    fn expands_one_gene_site_per_hour() {
        let pool = pool_with_hours(2);
        let demands = expand(&pool);
        assert_eq!(demands.len(), 2);
        assert!(demands.iter().all(|d| d.class_id == ClassId(1) && d.subject_id == SubjectId(1)));
    }

    #[test]
    fn ignores_subjects_absent_from_curriculum() {
        let mut pool = pool_with_hours(2);
        pool.subjects.push(Subject {
            id: SubjectId(2),
            code: "S2".to_string(),
            name: "Unlisted".to_string(),
            grade_level: None,
            department_id: None,
            room_type: RoomType::Theory,
            is_compulsory: false,
        });
        let demands = expand(&pool);
        assert!(demands.iter().all(|d| d.subject_id != SubjectId(2)));
    }
}
