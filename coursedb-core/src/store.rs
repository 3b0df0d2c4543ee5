//! The collection store.
//!
//! [`CourseStore`] owns the find/insert/update/delete logic over the course
//! sequence. Every operation runs one full cycle against its codec:
//!
//! ```text
//! load -> locate -> (mutate) -> (save) -> respond
//! ```
//!
//! No document is cached between operations. Cycles that share a store are
//! serialized by an async read/write lock: reads may overlap each other, a
//! mutation holds the lock exclusively from its load to the end of its save.
//!
//! # Example
//!
//! ```ignore
//! use coursedb_core::{store::CourseStore, id::IdPolicy};
//!
//! let store = CourseStore::builder(codec)
//!     .id_policy(IdPolicy::MaxPlusOne)
//!     .build();
//!
//! let algebra = store.insert(fields).await?;
//! let all = store.list_all().await?;
//! ```

use mea::rwlock::RwLock;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    codec::StorageCodec,
    command::{Command, Reply},
    document::{Course, CourseId, Fields, ID_FIELD},
    error::{CourseStoreError, CourseStoreResult},
    id::{IdPolicy, IdProtection},
    outcome::Outcome,
};

/// Behavioural switches of a [`CourseStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// How new ids are assigned on insert.
    pub id_policy: IdPolicy,
    /// Whether updates may change a course id.
    pub id_protection: IdProtection,
}

/// A course collection persisted through a [`StorageCodec`].
///
/// # Type Parameters
///
/// * `C` - The codec implementation type
#[derive(Debug)]
pub struct CourseStore<C: StorageCodec> {
    codec: C,
    options: StoreOptions,
    lock: RwLock<()>,
}

impl<C: StorageCodec> CourseStore<C> {
    /// Creates a store with default options (max-id-plus-one ids, protected ids).
    pub fn new(codec: C) -> Self {
        Self::with_options(codec, StoreOptions::default())
    }

    pub fn with_options(codec: C, options: StoreOptions) -> Self {
        Self {
            codec,
            options,
            lock: RwLock::new(()),
        }
    }

    /// Creates a builder for constructing a store with custom options.
    pub fn builder(codec: C) -> CourseStoreBuilder<C> {
        CourseStoreBuilder::new(codec)
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Returns the underlying codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Returns every course in insertion order.
    ///
    /// # Errors
    ///
    /// Propagates the codec's load error.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_all(&self) -> CourseStoreResult<Vec<Course>> {
        let _guard = self.lock.read().await;
        let document = self.codec.load().await?;

        debug!(count = document.len(), "listed courses");

        Ok(document.into_courses())
    }

    /// Returns the first course whose id equals `id`.
    ///
    /// # Errors
    ///
    /// Propagates the codec's load error. A missing course is [`Outcome::NotFound`].
    #[instrument(level = "debug", skip(self))]
    pub async fn get_by_id(&self, id: CourseId) -> CourseStoreResult<Outcome<Course>> {
        let _guard = self.lock.read().await;
        let document = self.codec.load().await?;

        Ok(document.find(id).cloned().into())
    }

    /// Appends a new course built from `fields` and persists the document.
    ///
    /// The id comes from the configured [`IdPolicy`]; an `id` key in `fields` is
    /// ignored. Returns the course as stored.
    ///
    /// # Errors
    ///
    /// Propagates load and save errors. When the save fails nothing is reported
    /// as created. Fails with [`CourseStoreError::IdSpaceExhausted`] when the
    /// policy has no id left to hand out.
    #[instrument(level = "debug", skip(self, fields))]
    pub async fn insert(&self, fields: Fields) -> CourseStoreResult<Course> {
        let _guard = self.lock.write().await;
        let mut document = self.codec.load().await?;

        let id = self.options.id_policy.next_id(document.courses())?;
        let course = Course::new(id, fields);

        document.push(course.clone());
        self.codec.save(&document).await?;

        debug!(id, "inserted course");

        Ok(course)
    }

    /// Merges `fields` into the first course whose id equals `id` and persists the document.
    ///
    /// Existing keys absent from `fields` are kept. The id follows the configured
    /// [`IdProtection`]. When no course matches, nothing is written.
    ///
    /// # Errors
    ///
    /// Propagates load and save errors. Under [`IdProtection::CallerMutable`], an
    /// `id` that is not an integer, or that another course already holds, yields
    /// [`CourseStoreError::InvalidCourse`] and nothing is written.
    #[instrument(level = "debug", skip(self, fields))]
    pub async fn update_by_id(
        &self,
        id: CourseId,
        fields: Fields,
    ) -> CourseStoreResult<Outcome<Course>> {
        let _guard = self.lock.write().await;
        let mut document = self.codec.load().await?;

        let Some(index) = document.position(id) else {
            warn!(id, "update of unknown course");
            return Ok(Outcome::NotFound);
        };

        let new_id = match self.options.id_protection {
            IdProtection::Protected => None,
            IdProtection::CallerMutable => fields
                .get(ID_FIELD)
                .map(parse_id)
                .transpose()?,
        };

        if let Some(taken) = new_id.filter(|new_id| *new_id != id && document.position(*new_id).is_some()) {
            warn!(id, new_id = taken, "update to an id held by another course");
            return Err(CourseStoreError::InvalidCourse(format!("id {taken} is already taken")));
        }

        let updated = {
            let Some(course) = document.course_mut(index) else {
                return Ok(Outcome::NotFound);
            };

            if let Some(new_id) = new_id {
                course.set_id(new_id);
            }
            course.merge(fields);

            course.clone()
        };

        self.codec.save(&document).await?;

        debug!(id, new_id = updated.id(), "updated course");

        Ok(Outcome::Found(updated))
    }

    /// Removes the first course whose id equals `id` and persists the document.
    ///
    /// Returns the removed course. When no course matches, nothing is written.
    ///
    /// # Errors
    ///
    /// Propagates load and save errors.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_by_id(&self, id: CourseId) -> CourseStoreResult<Outcome<Course>> {
        let _guard = self.lock.write().await;
        let mut document = self.codec.load().await?;

        let Some(index) = document.position(id) else {
            warn!(id, "delete of unknown course");
            return Ok(Outcome::NotFound);
        };

        let removed = document.remove(index);
        self.codec.save(&document).await?;

        debug!(id, remaining = document.len(), "deleted course");

        Ok(Outcome::Found(removed))
    }

    /// Runs a parsed command and wraps its result in a [`Reply`].
    #[instrument(level = "debug", skip(self, command), fields(command = command.name(), target = ?command.target()))]
    pub async fn execute(&self, command: Command) -> CourseStoreResult<Reply> {
        Ok(match command {
            Command::ListAll => Reply::Courses(self.list_all().await?),
            Command::GetById(id) => match self.get_by_id(id).await? {
                Outcome::Found(course) => Reply::Course(course),
                Outcome::NotFound => Reply::NotFound(id),
            },
            Command::Insert(fields) => Reply::Created(self.insert(fields).await?),
            Command::UpdateById(id, fields) => match self.update_by_id(id, fields).await? {
                Outcome::Found(course) => Reply::Updated(course),
                Outcome::NotFound => Reply::NotFound(id),
            },
            Command::DeleteById(id) => match self.delete_by_id(id).await? {
                Outcome::Found(course) => Reply::Deleted(course),
                Outcome::NotFound => Reply::NotFound(id),
            },
        })
    }
}

fn parse_id(value: &Value) -> CourseStoreResult<CourseId> {
    value.as_i64().ok_or_else(|| {
        CourseStoreError::InvalidCourse(format!("id must be an integer, got {value}"))
    })
}

/// Builder for constructing [`CourseStore`] instances.
///
/// # Example
///
/// ```ignore
/// let store = CourseStore::builder(codec)
///     .id_policy(IdPolicy::SequenceLength)
///     .id_protection(IdProtection::CallerMutable)
///     .build();
/// ```
#[derive(Debug)]
pub struct CourseStoreBuilder<C: StorageCodec> {
    codec: C,
    options: StoreOptions,
}

impl<C: StorageCodec> CourseStoreBuilder<C> {
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            options: StoreOptions::default(),
        }
    }

    pub fn id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.options.id_policy = id_policy;
        self
    }

    pub fn id_protection(mut self, id_protection: IdProtection) -> Self {
        self.options.id_protection = id_protection;
        self
    }

    pub fn build(self) -> CourseStore<C> {
        CourseStore::with_options(self.codec, self.options)
    }
}
