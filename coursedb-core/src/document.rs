//! The persisted data model.
//!
//! A [`CourseDocument`] is the whole JSON object written to storage. It holds the
//! course sequence under the fixed [`COLLECTION_KEY`] and carries any other
//! top-level keys through untouched. Each [`Course`] is an integer id plus
//! arbitrary caller-supplied fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CourseStoreError, CourseStoreResult};

/// The key under which the course sequence is stored.
pub const COLLECTION_KEY: &str = "Cursos";

/// The name of the identifier field of every course.
pub const ID_FIELD: &str = "id";

/// Identifier of a course within the collection.
pub type CourseId = i64;

/// Caller-supplied course fields, in insertion order.
pub type Fields = Map<String, Value>;

/// A single course record.
///
/// The id is kept apart from the remaining fields so that a record can never
/// carry two `id` keys. Serialized form puts `id` first:
///
/// ```ignore
/// let course = Course::new(1, fields);
/// assert_eq!(serde_json::to_string(&course)?, r#"{"id":1,"name":"Algebra"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    #[serde(flatten)]
    fields: Fields,
}

impl Course {
    /// Creates a course from an id and caller fields. Any `id` key inside
    /// `fields` is discarded in favour of `id`.
    pub fn new(id: CourseId, mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);

        Self { id, fields }
    }

    /// Returns the course identifier.
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Returns every field except `id`.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a single field by name. `"id"` is answered from the identifier.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == ID_FIELD {
            return Some(Value::from(self.id));
        }

        self.fields.get(key).cloned()
    }

    /// Overwrites matching keys with `fields`, keeping every other key and the id.
    pub(crate) fn merge(&mut self, fields: Fields) {
        for (key, value) in fields {
            if key != ID_FIELD {
                self.fields.insert(key, value);
            }
        }
    }

    pub(crate) fn set_id(&mut self, id: CourseId) {
        self.id = id;
    }

    /// Converts the course into a JSON object value.
    pub fn to_value(&self) -> CourseStoreResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// The root persisted object.
///
/// The `Cursos` key is mandatory: a document without it fails to decode rather
/// than loading as an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDocument {
    #[serde(rename = "Cursos")]
    courses: Vec<Course>,
    #[serde(flatten)]
    extra: Fields,
}

impl CourseDocument {
    /// Creates an empty document, `{"Cursos": []}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a document from the raw bytes of the backing storage.
    ///
    /// # Errors
    ///
    /// Returns [`CourseStoreError::StorageRead`] when the bytes are not JSON, the
    /// `Cursos` key is absent, or a record has no integer id.
    pub fn decode(bytes: &[u8]) -> CourseStoreResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| CourseStoreError::StorageRead(format!("malformed document: {e}")))
    }

    /// Encodes the document into the bytes written to the backing storage.
    pub fn encode(&self, pretty: bool) -> CourseStoreResult<Vec<u8>> {
        Ok(match pretty {
            true => serde_json::to_vec_pretty(self)?,
            false => serde_json::to_vec(self)?,
        })
    }

    /// Returns the course sequence in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Consumes the document, returning the course sequence.
    pub fn into_courses(self) -> Vec<Course> {
        self.courses
    }

    /// Top-level keys other than `Cursos`.
    pub fn extra(&self) -> &Fields {
        &self.extra
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Index of the first course with the given id.
    pub(crate) fn position(&self, id: CourseId) -> Option<usize> {
        self.courses
            .iter()
            .position(|course| course.id == id)
    }

    pub(crate) fn find(&self, id: CourseId) -> Option<&Course> {
        self.courses
            .iter()
            .find(|course| course.id == id)
    }

    pub(crate) fn push(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub(crate) fn course_mut(&mut self, index: usize) -> Option<&mut Course> {
        self.courses.get_mut(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Course {
        self.courses.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_course_serializes_id_first() {
        let course = Course::new(1, fields(json!({ "name": "Algebra", "credits": 4 })));

        assert_eq!(
            serde_json::to_string(&course).unwrap(),
            r#"{"id":1,"name":"Algebra","credits":4}"#
        );
    }

    #[test]
    fn test_course_new_discards_caller_id() {
        let course = Course::new(7, fields(json!({ "id": 99, "name": "Algebra" })));

        assert_eq!(course.id(), 7);
        assert!(!course.fields().contains_key("id"));
        assert_eq!(course.get("id"), Some(json!(7)));
    }

    #[test]
    fn test_merge_overwrites_only_supplied_keys() {
        let mut course = Course::new(
            3,
            fields(json!({ "name": "Algebra", "teacher": "Ada", "credits": 4 })),
        );

        course.merge(fields(json!({ "teacher": "Grace", "room": "B2", "id": 10 })));

        assert_eq!(course.id(), 3);
        assert_eq!(
            course.to_value().unwrap(),
            json!({ "id": 3, "name": "Algebra", "teacher": "Grace", "credits": 4, "room": "B2" })
        );
    }

    #[test]
    fn test_decode_requires_collection_key() {
        let err = CourseDocument::decode(br#"{"Courses": []}"#).unwrap_err();

        assert!(matches!(err, CourseStoreError::StorageRead(_)));
    }

    #[test]
    fn test_decode_rejects_record_without_integer_id() {
        assert!(CourseDocument::decode(br#"{"Cursos": [{"name": "Algebra"}]}"#).is_err());
        assert!(CourseDocument::decode(br#"{"Cursos": [{"id": "one"}]}"#).is_err());
        assert!(CourseDocument::decode(b"not json").is_err());
    }

    #[test]
    fn test_decode_accepts_negative_id() {
        let raw = br#"{"Cursos":[{"id":-1,"name":"Legacy"}]}"#;

        let document = CourseDocument::decode(raw).unwrap();

        assert_eq!(document.courses()[0].id(), -1);
        assert_eq!(document.find(-1).and_then(|c| c.get("name")), Some(json!("Legacy")));
        assert_eq!(document.encode(false).unwrap(), raw.to_vec());
    }

    #[test]
    fn test_decode_encode_preserves_order_and_extra_keys() {
        let raw = br#"{"Cursos":[{"id":2,"name":"Calculus"},{"id":1,"name":"Algebra","tags":["math"]}],"version":3}"#;

        let document = CourseDocument::decode(raw).unwrap();
        let ids: Vec<_> = document.courses().iter().map(Course::id).collect();

        assert_eq!(ids, vec![2, 1]);
        assert_eq!(document.extra().get("version"), Some(&json!(3)));

        let encoded = document.encode(false).unwrap();
        assert_eq!(CourseDocument::decode(&encoded).unwrap(), document);
        assert_eq!(
            serde_json::from_slice::<Value>(&encoded).unwrap(),
            serde_json::from_slice::<Value>(raw).unwrap()
        );
    }

    #[test]
    fn test_empty_document_encoding() {
        let encoded = CourseDocument::new().encode(false).unwrap();

        assert_eq!(encoded, br#"{"Cursos":[]}"#.to_vec());
    }
}
