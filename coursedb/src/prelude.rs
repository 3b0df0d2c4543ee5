//! Convenient re-exports of commonly used types from coursedb.
//!
//! ```ignore
//! use coursedb::prelude::*;
//! ```

pub use coursedb_core::{
    codec::{StorageCodec, StorageCodecBuilder},
    command::{Command, Reply},
    document::{Course, CourseDocument, CourseId, Fields},
    error::{CourseStoreError, CourseStoreResult},
    id::{IdPolicy, IdProtection},
    outcome::Outcome,
    store::{CourseStore, CourseStoreBuilder, StoreOptions},
};
