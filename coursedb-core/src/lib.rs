//! Core of the coursedb project: a course collection persisted as one JSON document.
//!
//! This crate provides:
//!
//! - **Data model** ([`document`]) - The persisted [`CourseDocument`](document::CourseDocument) and its [`Course`](document::Course) records
//! - **Storage codec abstraction** ([`codec`]) - Traits for loading and saving the whole document
//! - **Collection store** ([`store`]) - Find/insert/update/delete over the course sequence
//! - **Command dispatch** ([`command`]) - Parsed commands and their replies for request adapters
//! - **Identifier policies** ([`id`]) - How new ids are assigned and whether updates may change them
//! - **Lookup outcomes** ([`outcome`]) - The `Found | NotFound` result of by-id operations
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use coursedb_core::{store::CourseStore, outcome::Outcome};
//! use serde_json::json;
//!
//! let store = CourseStore::new(codec);
//! let created = store.insert(json!({ "name": "Algebra" }).as_object().unwrap().clone()).await?;
//!
//! match store.get_by_id(created.id).await? {
//!     Outcome::Found(course) => println!("{course:?}"),
//!     Outcome::NotFound => println!("gone"),
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as coursedb_core;

pub mod codec;
pub mod command;
pub mod document;
pub mod error;
pub mod id;
pub mod outcome;
pub mod store;
