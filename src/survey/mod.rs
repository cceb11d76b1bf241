//! Survey questions, their answer domains, and response records.
//!
//! - [`CategoryCatalog`]: the survey questions in display order, each with its
//!   permissible answers loaded from the category table
//! - [`ResponseRecord`]: one user's complete set of answers
//!
//! ## Example
//!
//! ```rust,ignore
//! use wellness_cluster::survey::CategoryCatalog;
//!
//! let catalog = CategoryCatalog::load("assets/questions.json", "assets/ui_categories.csv")?;
//! let record = catalog.default_record();
//! catalog.validate(&record)?;
//! ```

mod catalog;
mod record;

use serde::{Deserialize, Serialize};

pub use catalog::CategoryCatalog;
pub use record::ResponseRecord;

/// A single survey question with its answer domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    /// Stable key, matching the category table column and encoder feature.
    pub id: String,

    /// Human-readable prompt shown to the user.
    pub prompt: String,

    /// Permissible answers in display order. The first one is the default.
    pub domain: Vec<String>,
}

impl SurveyQuestion {
    /// The answer preselected when the form is first shown.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.domain.first().map(String::as_str)
    }

    /// Whether `value` is one of the permissible answers.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.domain.iter().any(|v| v == value)
    }
}

/// Turn a question key into a display label.
///
/// Underscores become spaces and each word is title-cased, so
/// `family_history` reads `Family History`.
#[must_use]
pub fn prettify_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prettify_key() {
        assert_eq!(prettify_key("family_history"), "Family History");
        assert_eq!(prettify_key("Growing_Stress"), "Growing Stress");
        assert_eq!(prettify_key("WORK_interest"), "Work Interest");
        assert_eq!(prettify_key("treatment"), "Treatment");
    }

    #[test]
    fn test_question_default_and_accepts() {
        let q = SurveyQuestion {
            id: "Work_Interest".to_string(),
            prompt: "How interested are you in your work recently?".to_string(),
            domain: vec!["High".to_string(), "Medium".to_string(), "Low".to_string()],
        };
        assert_eq!(q.default_value(), Some("High"));
        assert!(q.accepts("Low"));
        assert!(!q.accepts("low"));
    }
}
