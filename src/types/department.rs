use super::DepartmentId;
use serde::{Deserialize, Serialize};

/// A curriculum department (e.g. "Software Engineering", "Electrical
/// Installation"). Invariant: `code` and `name` are non-empty and unique
/// across departments (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub code: String,
    pub name: String,
}
