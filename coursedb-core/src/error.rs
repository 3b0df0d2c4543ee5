//! Error types and result types for course store operations.
//!
//! Use [`CourseStoreResult<T>`] as the return type for fallible operations. A missing
//! course is not an error; see [`Outcome`](crate::outcome::Outcome).

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible failures of the storage codec and the collection store.
#[derive(Error, Debug)]
pub enum CourseStoreError {
    /// The backing document is missing, unreadable or malformed.
    /// Nothing was mutated.
    #[error("Storage read error: {0}")]
    StorageRead(String),
    /// The backing document could not be written.
    /// The mutation that triggered the write did not take effect.
    #[error("Storage write error: {0}")]
    StorageWrite(String),
    /// Serialization/deserialization error when converting to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The caller payload cannot be turned into a valid course.
    #[error("Invalid course: {0}")]
    InvalidCourse(String),
    /// The id policy cannot produce an id that follows the current ones.
    #[error("Id space exhausted: {0}")]
    IdSpaceExhausted(String),
    /// Error during codec construction.
    #[error("Initialization error: {0}")]
    Initialization(String),
}

impl CourseStoreError {
    /// Returns `true` for failures of the backing storage itself.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            CourseStoreError::StorageRead(_) | CourseStoreError::StorageWrite(_)
        )
    }
}

/// A specialized `Result` type for course store operations.
pub type CourseStoreResult<T> = Result<T, CourseStoreError>;

impl From<SerdeJsonError> for CourseStoreError {
    fn from(err: SerdeJsonError) -> Self {
        CourseStoreError::Serialization(err.to_string())
    }
}
