//! Whole-file JSON storage for the course document.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, trace};

use coursedb_core::{
    codec::{StorageCodec, StorageCodecBuilder},
    document::CourseDocument,
    error::{CourseStoreError, CourseStoreResult},
};

/// Storage codec backed by one JSON file.
///
/// Every `load` reads the entire file and every `save` replaces its entire
/// contents. Failures are logged where they happen and then returned.
#[derive(Debug, Clone)]
pub struct JsonFileCodec {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileCodec {
    /// Creates a codec for `path` without touching the filesystem.
    ///
    /// A missing file is reported by the first `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    /// Creates a builder for constructing a `JsonFileCodec` with custom options.
    pub fn builder(path: impl Into<PathBuf>) -> JsonFileCodecBuilder {
        JsonFileCodecBuilder::new(path)
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

#[async_trait]
impl StorageCodec for JsonFileCodec {
    async fn load(&self) -> CourseStoreResult<CourseDocument> {
        let bytes = fs::read(&self.path).await.map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to read course document");
            CourseStoreError::StorageRead(format!("{}: {e}", self.path.display()))
        })?;

        trace!(path = %self.path.display(), bytes = bytes.len(), "read course document");

        CourseDocument::decode(&bytes).inspect_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to decode course document");
        })
    }

    async fn save(&self, document: &CourseDocument) -> CourseStoreResult<()> {
        let encoded = document.encode(self.pretty)?;

        fs::write(&self.path, &encoded).await.map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to write course document");
            CourseStoreError::StorageWrite(format!("{}: {e}", self.path.display()))
        })?;

        trace!(path = %self.path.display(), bytes = encoded.len(), "wrote course document");

        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Builder for constructing [`JsonFileCodec`] instances.
///
/// # Example
///
/// ```ignore
/// use coursedb_json::JsonFileCodec;
/// use coursedb_core::codec::StorageCodecBuilder;
///
/// let codec = JsonFileCodec::builder("data/db.json")
///     .pretty(true)
///     .create_if_missing(true)
///     .build()
///     .await?;
/// ```
#[derive(Debug)]
pub struct JsonFileCodecBuilder {
    path: PathBuf,
    pretty: bool,
    create_if_missing: bool,
}

impl JsonFileCodecBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
            create_if_missing: false,
        }
    }

    /// Pretty-prints the JSON written by `save`.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Writes an empty document, `{"Cursos":[]}`, when the file does not exist yet.
    pub fn create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }
}

#[async_trait]
impl StorageCodecBuilder for JsonFileCodecBuilder {
    type Codec = JsonFileCodec;

    async fn build(self) -> CourseStoreResult<Self::Codec> {
        let codec = JsonFileCodec {
            path: self.path,
            pretty: self.pretty,
        };

        if !self.create_if_missing {
            return Ok(codec);
        }

        let exists = fs::try_exists(&codec.path)
            .await
            .map_err(|e| CourseStoreError::Initialization(format!("{}: {e}", codec.path.display())))?;

        if exists {
            debug!(path = %codec.path.display(), "using existing course document");
            return Ok(codec);
        }

        if let Some(parent) = codec.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CourseStoreError::Initialization(format!("{}: {e}", parent.display())))?;
        }

        codec
            .save(&CourseDocument::new())
            .await
            .map_err(|e| CourseStoreError::Initialization(e.to_string()))?;

        info!(path = %codec.path.display(), "created empty course document");

        Ok(codec)
    }
}
