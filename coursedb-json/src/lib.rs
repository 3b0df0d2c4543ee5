//! JSON file storage codec for coursedb.
//!
//! This crate provides the file-backed implementation of the `StorageCodec` trait: the
//! whole course document lives in a single JSON file that is read in full on every load
//! and overwritten in full on every save.
//!
//! # Durability
//!
//! A save is a plain overwrite of the file contents. There is no temporary file and no
//! rename, so a crash in the middle of a write can leave a truncated file behind; the next
//! load then reports it as malformed.
//!
//! # Example
//!
//! ```ignore
//! use coursedb::{prelude::*, json::JsonFileCodec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let codec = JsonFileCodec::builder("db.json")
//!         .create_if_missing(true)
//!         .build()
//!         .await?;
//!
//!     let store = CourseStore::new(codec);
//!     println!("{:?}", store.list_all().await?);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as coursedb_json;

pub mod codec;

pub use codec::{JsonFileCodec, JsonFileCodecBuilder};
