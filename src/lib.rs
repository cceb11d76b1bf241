//! # wellness-cluster
//!
//! Survey answers in, cluster assignment and wellness report out.
//!
//! A pre-fitted pipeline (MCA projection → standard scaling → k-means) maps
//! one user's answers to a cluster id. The id resolves to a canned
//! interpretation, which is shown alongside the answers and rendered into a
//! paginated PDF report. Models and reference tables are trained elsewhere
//! and loaded once at startup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wellness_cluster::{AppConfig, AppState, FormController};
//!
//! let state = AppState::load(&AppConfig::from_dir("assets"))?;
//! let form = FormController::new(&state);
//!
//! let answers = form.record_from_pairs([("Mood_Swings", "No"), ("Work_Interest", "Low")])?;
//! let submission = form.submit(&answers, Some("Alex"))?;
//! std::fs::write(&submission.file_name, &submission.report)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`config`]: Asset locations and the loaded application state
//! - [`survey`]: Questions, answer domains and response records
//! - [`pipeline`]: Encode, scale and assign stages
//! - [`interpret`]: Cluster interpretations and profiles
//! - [`report`]: PDF report layout and rendering
//! - [`form`]: Form controller tying it all together

mod artifact;
pub mod config;
pub mod error;
pub mod form;
pub mod interpret;
pub mod pipeline;
pub mod report;
pub mod survey;

// Re-export commonly used types
pub use config::{AppConfig, AppState};
pub use error::{Error, Result};
pub use form::{FormController, Prediction, Submission};
pub use interpret::{ClusterInterpretation, ClusterProfile, ClusterProfiles, InterpretationMap};
pub use pipeline::{Clusterer, Encoder, InferencePipeline, Scaler};
pub use survey::{CategoryCatalog, ResponseRecord, SurveyQuestion};
