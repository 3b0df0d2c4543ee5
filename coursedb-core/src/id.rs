//! Identifier policies.
//!
//! [`IdPolicy`] decides the id of a newly inserted course; [`IdProtection`]
//! decides whether an update payload may change the id of an existing one.

use serde::{Deserialize, Serialize};

use crate::{
    document::{Course, CourseId},
    error::{CourseStoreError, CourseStoreResult},
};

/// How the id of a new course is computed from the current sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// `max(existing ids, 0) + 1`. Never reuses a surviving id, and never hands
    /// out an id below 1 even when every stored id is negative.
    #[default]
    MaxPlusOne,
    /// `len + 1`. After a deletion this can hand out an id that a surviving
    /// course still holds. Kept for compatibility with existing data files.
    SequenceLength,
}

impl IdPolicy {
    /// Computes the id for a course appended to `courses`.
    ///
    /// # Errors
    ///
    /// Returns [`CourseStoreError::IdSpaceExhausted`] when the next id would not
    /// fit in a [`CourseId`].
    pub fn next_id(&self, courses: &[Course]) -> CourseStoreResult<CourseId> {
        let last = match self {
            IdPolicy::MaxPlusOne => courses.iter().map(Course::id).fold(0, CourseId::max),
            IdPolicy::SequenceLength => CourseId::try_from(courses.len())
                .map_err(|_| CourseStoreError::IdSpaceExhausted(courses.len().to_string()))?,
        };

        last.checked_add(1).ok_or_else(|| {
            CourseStoreError::IdSpaceExhausted(format!("no id follows {last}"))
        })
    }
}

/// Whether an update payload may overwrite the stored id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdProtection {
    /// A caller-supplied `id` in an update payload is ignored.
    #[default]
    Protected,
    /// A caller-supplied `id` replaces the stored one.
    CallerMutable,
}
