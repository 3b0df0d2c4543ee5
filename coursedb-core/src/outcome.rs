//! Result of a by-id lookup.
//!
//! A missing record is a normal outcome, distinct from success and from storage
//! failures, so by-id operations return `CourseStoreResult<Outcome<T>>`.

use serde::Serialize;

/// Either the record matching an id, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    Found(T),
    NotFound,
}

impl<T> Outcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::NotFound => Outcome::NotFound,
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome::Found(value),
            None => Outcome::NotFound,
        }
    }
}

impl<T> From<Outcome<T>> for Option<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Found(value) => Some(value),
            Outcome::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_conversions() {
        assert_eq!(Outcome::from(Some(1)), Outcome::Found(1));
        assert_eq!(Outcome::<i32>::from(None), Outcome::NotFound);
        assert_eq!(Outcome::Found(2).into_option(), Some(2));
        assert_eq!(Outcome::<i32>::NotFound.into_option(), None);
    }

    #[test]
    fn test_map_keeps_not_found() {
        assert_eq!(Outcome::Found(2).map(|v| v * 10), Outcome::Found(20));
        assert!(Outcome::<i32>::NotFound.map(|v| v * 10).is_not_found());
    }
}
