//! A single user's answers.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Mapping from question id to the selected value, kept in insertion order.
///
/// Setting a question that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseRecord {
    answers: Vec<(String, String)>,
}

impl ResponseRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer for a question.
    pub fn set(&mut self, question: impl Into<String>, value: impl Into<String>) {
        let question = question.into();
        let value = value.into();
        match self.answers.iter_mut().find(|(q, _)| *q == question) {
            Some((_, existing)) => *existing = value,
            None => self.answers.push((question, value)),
        }
    }

    /// Builder-style variant of [`ResponseRecord::set`].
    #[must_use]
    pub fn with(mut self, question: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(question, value);
        self
    }

    /// Get the answer for a question.
    #[must_use]
    pub fn get(&self, question: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|(q, _)| q == question)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(question, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(q, v)| (q.as_str(), v.as_str()))
    }

    /// Number of answered questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Check if no question has been answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (q, v) in iter {
            record.set(q, v);
        }
        record
    }
}

// Serialized as a JSON object whose keys keep question order.
impl Serialize for ResponseRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.answers.len()))?;
        for (q, v) in &self.answers {
            map.serialize_entry(q, v)?;
        }
        map.end()
    }
}
