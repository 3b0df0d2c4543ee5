//! Parsed commands accepted by the store and the replies it produces.
//!
//! Request adapters translate their transport (HTTP, CLI, ...) into a [`Command`],
//! hand it to [`CourseStore::execute`](crate::store::CourseStore::execute) and
//! render the resulting [`Reply`]. The store itself knows nothing about transports.

use crate::document::{Course, CourseId, Fields};

/// One store operation with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListAll,
    GetById(CourseId),
    Insert(Fields),
    UpdateById(CourseId, Fields),
    DeleteById(CourseId),
}

impl Command {
    /// Operation name, used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListAll => "list_all",
            Command::GetById(_) => "get_by_id",
            Command::Insert(_) => "insert",
            Command::UpdateById(_, _) => "update_by_id",
            Command::DeleteById(_) => "delete_by_id",
        }
    }

    /// The id a by-id command addresses.
    pub fn target(&self) -> Option<CourseId> {
        match self {
            Command::GetById(id) | Command::UpdateById(id, _) | Command::DeleteById(id) => Some(*id),
            Command::ListAll | Command::Insert(_) => None,
        }
    }
}

/// The successful result of a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Every course, in insertion order.
    Courses(Vec<Course>),
    /// The course addressed by a read.
    Course(Course),
    /// The newly inserted course, with its assigned id.
    Created(Course),
    /// The course after the update was applied.
    Updated(Course),
    /// The course that was removed.
    Deleted(Course),
    /// No course holds the addressed id; nothing was changed.
    NotFound(CourseId),
}

impl Reply {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Reply::NotFound(_))
    }
}
