//! Category catalog: survey questions and their answer domains.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::{ResponseRecord, SurveyQuestion};
use crate::artifact::{csv_reader, find_header_index, read_json};
use crate::error::{Error, Result};

/// Prompt entry as stored in `questions.json`.
#[derive(Debug, Deserialize)]
struct QuestionPrompt {
    id: String,
    prompt: String,
}

/// The survey questions, in display order, with their answer domains.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    questions: Vec<SurveyQuestion>,
}

impl CategoryCatalog {
    /// Load the catalog from the prompt list and the category table.
    ///
    /// The category table has one column per question id; each column lists
    /// the permissible answers top to bottom. Blank cells are dropped, so
    /// columns may have different lengths.
    pub fn load(questions_path: impl AsRef<Path>, categories_path: impl AsRef<Path>) -> Result<Self> {
        let questions_path = questions_path.as_ref();
        let categories_path = categories_path.as_ref();

        let prompts: Vec<QuestionPrompt> = read_json(questions_path)?;

        let mut reader = csv_reader(categories_path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

        let mut columns: Vec<(usize, SurveyQuestion)> = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let idx = find_header_index(&header_refs, &prompt.id).ok_or_else(|| Error::MissingColumn {
                path: categories_path.to_path_buf(),
                column: prompt.id.clone(),
            })?;
            columns.push((
                idx,
                SurveyQuestion {
                    id: prompt.id,
                    prompt: prompt.prompt,
                    domain: Vec::new(),
                },
            ));
        }

        for (line_num, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::Artifact {
                path: categories_path.to_path_buf(),
                reason: format!("line {}: {e}", line_num + 2),
            })?;
            for (idx, question) in &mut columns {
                if let Some(cell) = record.get(*idx) {
                    if !cell.is_empty() {
                        question.domain.push(cell.to_string());
                    }
                }
            }
        }

        let catalog = Self::from_questions(columns.into_iter().map(|(_, q)| q).collect())?;
        info!(
            questions = catalog.questions.len(),
            path = %categories_path.display(),
            "Loaded category catalog"
        );
        Ok(catalog)
    }

    /// Build a catalog from already-assembled questions.
    ///
    /// Fails if any question has an empty domain or an id appears twice.
    pub fn from_questions(questions: Vec<SurveyQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::Config("survey has no questions".to_string()));
        }
        for (i, q) in questions.iter().enumerate() {
            if q.domain.is_empty() {
                return Err(Error::EmptyDomain { question: q.id.clone() });
            }
            if questions[..i].iter().any(|other| other.id == q.id) {
                return Err(Error::Config(format!("duplicate question id '{}'", q.id)));
            }
            debug!(question = %q.id, values = q.domain.len(), "Question domain");
        }
        Ok(Self { questions })
    }

    /// All questions in display order.
    #[must_use]
    pub fn questions(&self) -> &[SurveyQuestion] {
        &self.questions
    }

    /// Look up a question by id.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&SurveyQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Ordered permissible answers for a question.
    pub fn domain_values(&self, question_id: &str) -> Result<&[String]> {
        self.question(question_id)
            .map(|q| q.domain.as_slice())
            .ok_or_else(|| Error::UnknownQuestion(question_id.to_string()))
    }

    /// Record with every question set to the first value of its domain.
    #[must_use]
    pub fn default_record(&self) -> ResponseRecord {
        self.questions
            .iter()
            .filter_map(|q| q.default_value().map(|v| (q.id.clone(), v.to_string())))
            .collect()
    }

    /// Check that a record answers exactly the catalog's questions with
    /// in-domain values.
    pub fn validate(&self, record: &ResponseRecord) -> Result<()> {
        for (question, value) in record.iter() {
            let q = self
                .question(question)
                .ok_or_else(|| Error::UnknownQuestion(question.to_string()))?;
            if !q.accepts(value) {
                return Err(Error::InvalidAnswer {
                    question: question.to_string(),
                    value: value.to_string(),
                });
            }
        }
        for q in &self.questions {
            if record.get(&q.id).is_none() {
                return Err(Error::MissingAnswer { question: q.id.clone() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn sample_catalog() -> CategoryCatalog {
        CategoryCatalog::from_questions(vec![
            SurveyQuestion {
                id: "treatment".to_string(),
                prompt: "Are you currently undergoing treatment?".to_string(),
                domain: vec!["Yes".to_string(), "No".to_string()],
            },
            SurveyQuestion {
                id: "Work_Interest".to_string(),
                prompt: "How interested are you in your work recently?".to_string(),
                domain: vec!["High".to_string(), "Medium".to_string(), "Low".to_string()],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_load_drops_blank_cells() {
        let dir = tempfile::tempdir().unwrap();
        let questions = write_file(
            &dir,
            "questions.json",
            r#"[{"id": "treatment", "prompt": "Treatment?"}, {"id": "Mood_Swings", "prompt": "Mood swings?"}]"#,
        );
        let categories = write_file(
            &dir,
            "ui_categories.csv",
            "treatment,Mood_Swings,unused\nYes,Yes,x\nNo,No,y\n,Maybe,\n",
        );

        let catalog = CategoryCatalog::load(&questions, &categories).unwrap();
        assert_eq!(catalog.domain_values("treatment").unwrap(), ["Yes", "No"]);
        assert_eq!(catalog.domain_values("Mood_Swings").unwrap(), ["Yes", "No", "Maybe"]);
        assert_eq!(catalog.questions()[1].prompt, "Mood swings?");
    }

    #[test]
    fn test_load_missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let questions = write_file(&dir, "questions.json", r#"[{"id": "treatment", "prompt": "?"}]"#);
        let categories = write_file(&dir, "ui_categories.csv", "family_history\nYes\n");

        let err = CategoryCatalog::load(&questions, &categories).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "treatment"));
    }

    #[test]
    fn test_load_blank_column_is_empty_domain() {
        let dir = tempfile::tempdir().unwrap();
        let questions = write_file(&dir, "questions.json", r#"[{"id": "treatment", "prompt": "?"}]"#);
        let categories = write_file(&dir, "ui_categories.csv", "treatment,other\n,a\n,b\n");

        let err = CategoryCatalog::load(&questions, &categories).unwrap_err();
        assert!(matches!(err, Error::EmptyDomain { .. }));
    }

    #[test]
    fn test_load_missing_table_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let questions = write_file(&dir, "questions.json", r#"[{"id": "treatment", "prompt": "?"}]"#);
        let err = CategoryCatalog::load(&questions, dir.path().join("absent.csv")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_default_record_uses_first_value() {
        let catalog = sample_catalog();
        let record = catalog.default_record();
        assert_eq!(record.get("treatment"), Some("Yes"));
        assert_eq!(record.get("Work_Interest"), Some("High"));
        catalog.validate(&record).unwrap();
    }

    #[test]
    fn test_validate_rejects_out_of_domain() {
        let catalog = sample_catalog();
        let record = catalog.default_record().with("Work_Interest", "Extreme");
        assert!(matches!(catalog.validate(&record), Err(Error::InvalidAnswer { .. })));

        let partial = ResponseRecord::new().with("treatment", "No");
        assert!(matches!(catalog.validate(&partial), Err(Error::MissingAnswer { .. })));

        let extra = catalog.default_record().with("shoe_size", "9");
        assert!(matches!(catalog.validate(&extra), Err(Error::UnknownQuestion(_))));
    }
}
