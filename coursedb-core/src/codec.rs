//! Storage codec abstraction for the course document.
//!
//! This module defines the boundary between the in-memory [`CourseDocument`] and
//! the bytes of its durable storage. The store never talks to a file directly;
//! it loads the whole document through a [`StorageCodec`] at the start of every
//! operation and saves the whole document back after every mutation.
//!
//! # Traits
//!
//! - [`StorageCodec`]: The core trait for codecs
//! - [`StorageCodecBuilder`]: Factory trait for creating codec instances
//!
//! # Examples
//!
//! ```ignore
//! use coursedb_core::codec::StorageCodec;
//!
//! let codec = MyCodecImpl::new();
//!
//! let document = codec.load().await?;
//! codec.save(&document).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{document::CourseDocument, error::CourseStoreResult};

/// Abstract interface for whole-document storage.
///
/// Implementers read and write the complete [`CourseDocument`] in one step:
/// no diffing, no streaming, no partial writes.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. A codec does not coordinate concurrent
/// writers on its own; [`CourseStore`](crate::store::CourseStore) serializes the
/// load-mutate-save cycles that share it.
///
/// # Error Handling
///
/// - `load` fails with [`StorageRead`](crate::error::CourseStoreError::StorageRead)
///   when the storage is missing, unreadable or malformed. It never substitutes an
///   empty document.
/// - `save` fails with [`StorageWrite`](crate::error::CourseStoreError::StorageWrite)
///   on any write failure.
#[async_trait]
pub trait StorageCodec: Send + Sync + Debug {
    /// Reads and decodes the entire document.
    ///
    /// # Returns
    ///
    /// Returns the decoded document, or a [`CourseStoreError`](crate::error::CourseStoreError) on failure.
    async fn load(&self) -> CourseStoreResult<CourseDocument>;

    /// Encodes the document and replaces the full storage contents with it.
    ///
    /// The previous contents are overwritten, not appended to or merged with.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to persist
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success, or a [`CourseStoreError`](crate::error::CourseStoreError) on failure.
    async fn save(&self, document: &CourseDocument) -> CourseStoreResult<()>;

    /// A short human-readable description of where the document lives.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

#[async_trait]
impl<C> StorageCodec for &C
where
    C: StorageCodec + ?Sized,
{
    async fn load(&self) -> CourseStoreResult<CourseDocument> {
        (**self).load().await
    }

    async fn save(&self, document: &CourseDocument) -> CourseStoreResult<()> {
        (**self).save(document).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[async_trait]
impl<C> StorageCodec for Arc<C>
where
    C: StorageCodec + ?Sized,
{
    async fn load(&self) -> CourseStoreResult<CourseDocument> {
        (**self).load().await
    }

    async fn save(&self, document: &CourseDocument) -> CourseStoreResult<()> {
        (**self).save(document).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[async_trait]
impl<C> StorageCodec for Box<C>
where
    C: StorageCodec + ?Sized,
{
    async fn load(&self) -> CourseStoreResult<CourseDocument> {
        (**self).load().await
    }

    async fn save(&self, document: &CourseDocument) -> CourseStoreResult<()> {
        (**self).save(document).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Factory trait for codecs that need asynchronous setup (opening or seeding storage).
#[async_trait]
pub trait StorageCodecBuilder {
    type Codec: StorageCodec;

    async fn build(self) -> CourseStoreResult<Self::Codec>;
}
