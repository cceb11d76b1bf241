//! Form controller: collect answers, run the pipeline, produce results.
//!
//! The controller borrows the immutable [`AppState`] and keeps nothing
//! between submissions; every call to [`FormController::submit`] is an
//! independent computation.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppState;
use crate::error::{Error, Result};
use crate::interpret::{ClusterInterpretation, ClusterProfile};
use crate::report;
use crate::survey::ResponseRecord;

/// Outcome of running the pipeline on one record, without a report.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Assigned cluster id.
    pub cluster: usize,
    /// Interpretation of that cluster.
    pub interpretation: ClusterInterpretation,
    /// Profile row for that cluster, if the table has one.
    pub profile: Option<ClusterProfile>,
    /// The submitted answers, echoed back.
    pub answers: ResponseRecord,
}

/// A completed submission including the rendered report.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Prediction shown on screen.
    pub prediction: Prediction,
    /// Download name, `Wellness_Report_<name>.pdf`.
    pub file_name: String,
    /// Complete PDF document.
    pub report: Vec<u8>,
}

/// Drives one form interaction against the loaded state.
#[derive(Debug, Clone, Copy)]
pub struct FormController<'a> {
    state: &'a AppState,
}

impl<'a> FormController<'a> {
    /// Create a controller over loaded state.
    #[must_use]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Record with every question at its default (first) value.
    #[must_use]
    pub fn defaults(&self) -> ResponseRecord {
        self.state.catalog.default_record()
    }

    /// Start from defaults and apply explicit `(question, value)` answers.
    ///
    /// Unknown questions and out-of-domain values are rejected.
    pub fn record_from_pairs<I, K, V>(&self, pairs: I) -> Result<ResponseRecord>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = self.defaults();
        for (question, value) in pairs {
            let (question, value) = (question.as_ref(), value.as_ref());
            let q = self
                .state
                .catalog
                .question(question)
                .ok_or_else(|| Error::UnknownQuestion(question.to_string()))?;
            if !q.accepts(value) {
                return Err(Error::InvalidAnswer {
                    question: question.to_string(),
                    value: value.to_string(),
                });
            }
            record.set(question, value);
        }
        Ok(record)
    }

    /// Prompt for each question on `output`, reading choices from `input`.
    ///
    /// Choices are numbered from 1; an empty line keeps the default. Invalid
    /// input is reported and the question asked again.
    pub fn collect_interactive<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<ResponseRecord> {
        let mut record = ResponseRecord::new();
        for question in self.state.catalog.questions() {
            writeln!(output, "{}", question.prompt)?;
            for (i, value) in question.domain.iter().enumerate() {
                let marker = if i == 0 { " (default)" } else { "" };
                writeln!(output, "  {}) {value}{marker}", i + 1)?;
            }

            let value = loop {
                write!(output, "> ")?;
                output.flush()?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "input closed before the form was complete",
                    )));
                }
                let line = line.trim();
                if line.is_empty() {
                    break question.domain[0].clone();
                }
                if let Some(v) = line
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| question.domain.get(i))
                {
                    break v.clone();
                }
                if question.accepts(line) {
                    break line.to_string();
                }
                writeln!(output, "Please choose 1-{}", question.domain.len())?;
            };
            record.set(question.id.clone(), value);
        }
        Ok(record)
    }

    /// Run the pipeline and resolve the interpretation.
    pub fn predict(&self, answers: &ResponseRecord) -> Result<Prediction> {
        self.state.catalog.validate(answers)?;
        let cluster = self.state.pipeline.assign_cluster(answers)?;
        let interpretation = self.state.interpretations.interpretation(cluster)?.clone();
        let profile = self.state.profiles.profile(cluster);
        if profile.is_none() {
            warn!(cluster, "Cluster has no profile row");
        }
        Ok(Prediction {
            cluster,
            interpretation,
            profile,
            answers: answers.clone(),
        })
    }

    /// Predict and render the report. Nothing is returned unless rendering
    /// completed.
    pub fn submit(&self, answers: &ResponseRecord, requester: Option<&str>) -> Result<Submission> {
        let prediction = self.predict(answers)?;
        let report = report::render(&prediction.interpretation, &prediction.answers, requester)?.into_inner();
        let file_name = report::report_file_name(requester);
        info!(cluster = prediction.cluster, file = %file_name, bytes = report.len(), "Submission complete");
        Ok(Submission {
            prediction,
            file_name,
            report,
        })
    }
}
