use super::{SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// Encodes that `teacherId` is qualified to teach `subjectId` during
/// `academicYear`. Unique on the triple (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSubject {
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub academic_year: String,
}
