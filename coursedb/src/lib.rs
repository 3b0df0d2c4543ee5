//! Main coursedb crate providing a unified interface to the course store.
//!
//! This crate is the primary entry point for users of coursedb. It re-exports the core
//! types from `coursedb-core` and the available storage codecs.
//!
//! # Features
//!
//! - **Whole-document persistence** - The collection is one JSON object, loaded and saved in full
//! - **Explicit id policies** - Choose between max-id-plus-one and length-based id assignment
//! - **Tagged lookups** - By-id operations return `Found` or `NotFound`, never a silent default
//! - **Serialized mutations** - Load-mutate-save cycles through one store never lose updates
//!
//! # Quick Start
//!
//! ```ignore
//! use coursedb::{prelude::*, json::JsonFileCodec};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let codec = JsonFileCodec::builder("db.json")
//!         .create_if_missing(true)
//!         .build()
//!         .await
//!         .unwrap();
//!     let store = CourseStore::new(codec);
//!
//!     let algebra = store
//!         .insert(json!({ "name": "Algebra" }).as_object().cloned().unwrap())
//!         .await
//!         .unwrap();
//!
//!     match store.get_by_id(algebra.id()).await.unwrap() {
//!         Outcome::Found(course) => println!("found {course:?}"),
//!         Outcome::NotFound => println!("no such course"),
//!     }
//! }
//! ```
//!
//! # Runtime codec selection
//!
//! Codecs can be chosen at runtime by boxing them; `Box<dyn StorageCodec>` is itself a codec.
//!
//! ```ignore
//! use coursedb::{prelude::*, json::JsonFileCodec, memory::InMemoryCodec};
//!
//! let codec: Box<dyn StorageCodec> = if in_memory {
//!     Box::new(InMemoryCodec::new())
//! } else {
//!     Box::new(JsonFileCodec::new("db.json"))
//! };
//!
//! let store = CourseStore::new(codec);
//! ```
//!
//! # Codecs
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`json`] - Whole-file JSON storage (requires the `json` feature, enabled by default)

pub mod prelude;

pub use coursedb_core::{codec, command, document, error, id, outcome, store};

// Re-export serde_json for building course fields
pub use serde_json;

/// In-memory storage codec.
pub mod memory {
    pub use coursedb_memory::{InMemoryCodec, InMemoryCodecBuilder};
}

/// Whole-file JSON storage codec.
///
/// This module is only available when the `json` feature is enabled.
#[cfg(feature = "json")]
pub mod json {
    pub use coursedb_json::{JsonFileCodec, JsonFileCodecBuilder};
}
