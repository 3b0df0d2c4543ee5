//! In-memory storage codec for coursedb.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StorageCodec` trait.
//! The document is kept as encoded JSON bytes behind an async-aware read-write lock, so every
//! load and save goes through the same encode/decode path as the file codec. It is ideal for
//! development, testing, and throwaway servers.
//!
//! # Quick Start
//!
//! ```ignore
//! use coursedb::{prelude::*, memory::InMemoryCodec};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let codec = InMemoryCodec::builder().build().await?;
//!     let store = CourseStore::new(codec);
//!
//!     let course = store
//!         .insert(json!({ "name": "Algebra" }).as_object().cloned().unwrap())
//!         .await?;
//!
//!     assert_eq!(course.id(), 1);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as coursedb_memory;

pub mod codec;

pub use codec::{InMemoryCodec, InMemoryCodecBuilder};
