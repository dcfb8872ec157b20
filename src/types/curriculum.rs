use super::{CurriculumId, DepartmentId, SubjectId};
use serde::{Deserialize, Serialize};

/// A required-hours row: subject × department × grade × year → weekly
/// hours. Invariant: `hoursPerWeek ∈ [1, 10]` and the tuple
/// `(subjectId, departmentId, gradeLevel, academicYear)` is unique
/// (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    pub id: CurriculumId,
    pub subject_id: SubjectId,
    pub department_id: DepartmentId,
    pub grade_level: u8,
    pub hours_per_week: u8,
    pub academic_year: String,
}

impl Curriculum {
    pub fn hours_in_range(&self) -> bool {
        (1..=10).contains(&self.hours_per_week)
    }
}
