use super::TeacherId;
use serde::{Deserialize, Serialize};

/// A qualified instructor. Invariant: `code` is non-empty and unique
/// (spec.md §3). Qualifications and availability are recorded in
/// [`super::TeacherSubject`] and [`super::TeacherAvailability`], not here —
/// `Teacher` itself carries no subject list, unlike the teacher crate's
/// `Teacher::subjects`, because qualification is year-scoped data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub code: String,
    pub name: String,
    pub is_active: bool,
}
