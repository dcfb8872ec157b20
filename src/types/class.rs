use super::DepartmentId;
use serde::{Deserialize, Serialize};

/// Grade level a class belongs to (spec.md §3: `gradeLevel ∈ {10,11,12}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GradeLevel(u8);

impl GradeLevel {
    pub fn new(level: u8) -> Option<Self> {
        matches!(level, 10 | 11 | 12).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for GradeLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GradeLevel::new(value).ok_or_else(|| format!("gradeLevel must be 10, 11 or 12, got {value}"))
    }
}

impl From<GradeLevel> for u8 {
    fn from(value: GradeLevel) -> Self {
        value.0
    }
}

/// A student cohort timetabled as a unit. `academicYear` must match
/// `YYYY[-/]YYYY` (spec.md §3); enforced by callers constructing the value
/// via [`Class::new`] or by deserialization validation in the resource
/// loader, since the wire format allows arbitrary strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: super::ClassId,
    pub name: String,
    pub grade_level: GradeLevel,
    pub department_id: DepartmentId,
    pub academic_year: String,
    pub is_active: bool,
}

/// Returns true when `year` has the shape `YYYY-YYYY` or `YYYY/YYYY`.
pub fn is_valid_academic_year(year: &str) -> bool {
    let sep = if year.contains('-') {
        '-'
    } else if year.contains('/') {
        '/'
    } else {
        return false;
    };
    let parts: Vec<&str> = year.splitn(2, sep).collect();
    parts.len() == 2
        && parts[0].len() == 4
        && parts[1].len() == 4
        && parts[0].chars().all(|c| c.is_ascii_digit())
        && parts[1].chars().all(|c| c.is_ascii_digit())
}
