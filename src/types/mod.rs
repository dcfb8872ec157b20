mod class;
mod curriculum;
mod department;
mod ga_params;
mod room;
mod room_department;
mod schedule;
mod subject;
mod teacher;
mod teacher_availability;
mod teacher_subject;
mod time_slot;

pub use class::*;
pub use curriculum::*;
pub use department::*;
pub use ga_params::*;
pub use room::*;
pub use room_department::*;
pub use schedule::*;
pub use subject::*;
pub use teacher::*;
pub use teacher_availability::*;
pub use teacher_subject::*;
pub use time_slot::*;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The sentinel used by GA initialization when a candidate set is
            /// empty for a demand; never a real persisted id.
            pub const SENTINEL: $name = $name(0);

            pub fn is_sentinel(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(DepartmentId);
id_newtype!(ClassId);
id_newtype!(TeacherId);
id_newtype!(SubjectId);
id_newtype!(CurriculumId);
id_newtype!(RoomId);
id_newtype!(TimeSlotId);
id_newtype!(ScheduleId);
id_newtype!(ScheduleDetailId);
id_newtype!(ScheduleConflictId);

/// Room / subject room-type classification (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Theory,
    Practicum,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Theory => write!(f, "theory"),
            RoomType::Practicum => write!(f, "practicum"),
        }
    }
}
