//! In-memory storage implementation for the course document.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use std::sync::Arc;
use tracing::{error, trace};

use coursedb_core::{
    codec::{StorageCodec, StorageCodecBuilder},
    document::CourseDocument,
    error::{CourseStoreError, CourseStoreResult},
};

/// Thread-safe in-memory storage codec.
///
/// Holds the encoded document bytes, or nothing. A codec holding nothing behaves
/// like a missing file: `load` fails with `StorageRead`.
///
/// # Thread Safety
///
/// `InMemoryCodec` is cloneable and uses an `Arc`-wrapped internal state. Multiple
/// clones of the same instance share the same underlying bytes.
///
/// # Example
///
/// ```ignore
/// use coursedb_memory::InMemoryCodec;
/// use coursedb_core::codec::StorageCodec;
///
/// let codec = InMemoryCodec::new();
/// let document = codec.load().await?;
/// assert!(document.is_empty());
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryCodec {
    contents: Arc<RwLock<Option<Vec<u8>>>>,
    pretty: bool,
}

impl InMemoryCodec {
    /// Creates a codec seeded with an empty document, `{"Cursos":[]}`.
    pub fn new() -> Self {
        Self::from_bytes(br#"{"Cursos":[]}"#.to_vec())
    }

    /// Creates a codec holding nothing; the first `load` fails.
    pub fn unseeded() -> Self {
        Self::default()
    }

    /// Creates a codec holding the given raw bytes, which need not be valid JSON.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            contents: Arc::new(RwLock::new(Some(bytes))),
            pretty: false,
        }
    }

    /// Creates a builder for constructing an `InMemoryCodec` with custom options.
    pub fn builder() -> InMemoryCodecBuilder {
        InMemoryCodecBuilder::default()
    }

    /// Returns a copy of the raw stored bytes.
    pub async fn contents(&self) -> Option<Vec<u8>> {
        self.contents.read().await.clone()
    }
}

#[async_trait]
impl StorageCodec for InMemoryCodec {
    async fn load(&self) -> CourseStoreResult<CourseDocument> {
        let contents = self.contents.read().await;

        let Some(bytes) = contents.as_ref() else {
            error!("in-memory document has not been written");
            return Err(CourseStoreError::StorageRead(
                "in-memory document has not been written".into(),
            ));
        };

        trace!(bytes = bytes.len(), "loading in-memory document");

        CourseDocument::decode(bytes).inspect_err(|e| {
            error!(error = %e, "failed to decode in-memory document");
        })
    }

    async fn save(&self, document: &CourseDocument) -> CourseStoreResult<()> {
        let encoded = document.encode(self.pretty)?;

        trace!(bytes = encoded.len(), "saving in-memory document");

        *self.contents.write().await = Some(encoded);

        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Builder for constructing [`InMemoryCodec`] instances.
///
/// # Example
///
/// ```ignore
/// use coursedb_memory::InMemoryCodec;
/// use coursedb_core::codec::StorageCodecBuilder;
///
/// let codec = InMemoryCodec::builder()
///     .document(seed)
///     .pretty(true)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct InMemoryCodecBuilder {
    document: Option<CourseDocument>,
    pretty: bool,
}

impl InMemoryCodecBuilder {
    /// Seeds the codec with `document` instead of an empty one.
    pub fn document(mut self, document: CourseDocument) -> Self {
        self.document = Some(document);
        self
    }

    /// Pretty-prints the stored JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[async_trait]
impl StorageCodecBuilder for InMemoryCodecBuilder {
    type Codec = InMemoryCodec;

    async fn build(self) -> CourseStoreResult<Self::Codec> {
        let document = self.document.unwrap_or_default();

        Ok(InMemoryCodec {
            contents: Arc::new(RwLock::new(Some(document.encode(self.pretty)?))),
            pretty: self.pretty,
        })
    }
}
