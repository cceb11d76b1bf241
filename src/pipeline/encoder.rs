//! Multiple correspondence analysis projection.
//!
//! The fitted artifact stores, for every question, the standard column
//! coordinates of each category. A response row activates exactly one
//! category per question, so its row profile puts weight `1/Q` on each
//! active category and the projected row coordinate is the mean of the
//! active categories' coordinates.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CategoricalRow, Encoder};
use crate::artifact::read_json;
use crate::error::{Error, Result};

/// Fitted coordinates of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCoordinates {
    /// Category value as seen at fit time.
    pub value: String,
    /// Standard column coordinates, one per component.
    pub coordinates: Vec<f64>,
}

/// Fitted categories of one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedQuestion {
    /// Question id (feature column name).
    pub id: String,
    /// Categories seen at fit time.
    pub categories: Vec<CategoryCoordinates>,
}

/// Pre-fitted MCA transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McaEncoder {
    n_components: usize,
    questions: Vec<FittedQuestion>,
}

impl McaEncoder {
    /// Build an encoder, checking every coordinate vector has
    /// `n_components` entries.
    pub fn new(n_components: usize, questions: Vec<FittedQuestion>) -> Result<Self> {
        let encoder = Self { n_components, questions };
        encoder.check()?;
        Ok(encoder)
    }

    /// Load a fitted encoder from its JSON artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let encoder: Self = read_json(path)?;
        encoder.check().map_err(|e| Error::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(encoder)
    }

    fn check(&self) -> Result<()> {
        if self.n_components == 0 {
            return Err(Error::Config("encoder has zero components".to_string()));
        }
        if self.questions.is_empty() {
            return Err(Error::Config("encoder was fitted on no questions".to_string()));
        }
        for q in &self.questions {
            if q.categories.is_empty() {
                return Err(Error::Config(format!("encoder has no categories for '{}'", q.id)));
            }
            for cat in &q.categories {
                if cat.coordinates.len() != self.n_components {
                    return Err(Error::DimensionMismatch {
                        stage: "encoder",
                        expected: self.n_components,
                        actual: cat.coordinates.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Questions the encoder was fitted on, in fit order.
    #[must_use]
    pub fn questions(&self) -> &[FittedQuestion] {
        &self.questions
    }

    /// Whether `value` was seen for `question` at fit time.
    #[must_use]
    pub fn knows(&self, question: &str, value: &str) -> bool {
        self.questions
            .iter()
            .find(|q| q.id == question)
            .is_some_and(|q| q.categories.iter().any(|c| c.value == value))
    }
}

impl Encoder for McaEncoder {
    fn transform(&self, row: &CategoricalRow) -> Result<Vec<f64>> {
        if let Some(extra) = row
            .columns()
            .iter()
            .find(|c| !self.questions.iter().any(|q| &q.id == *c))
        {
            return Err(Error::UnexpectedColumn(extra.clone()));
        }

        let mut coords = vec![0.0; self.n_components];
        for q in &self.questions {
            let value = row.get(&q.id).ok_or_else(|| Error::MissingAnswer { question: q.id.clone() })?;
            let cat = q
                .categories
                .iter()
                .find(|c| c.value == value)
                .ok_or_else(|| Error::UnseenCategory {
                    question: q.id.clone(),
                    value: value.to_string(),
                })?;
            for (acc, c) in coords.iter_mut().zip(&cat.coordinates) {
                *acc += c;
            }
        }

        let n = self.questions.len() as f64;
        for c in &mut coords {
            *c /= n;
        }
        Ok(coords)
    }

    fn n_components(&self) -> usize {
        self.n_components
    }
}
