//! Asset locations and the immutable application state loaded from them.
//!
//! [`AppState::load`] reads every artifact once and cross-checks them. The
//! result is never mutated and can be shared by reference across any number
//! of independent submissions.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::interpret::{ClusterProfiles, InterpretationMap};
use crate::pipeline::{InferencePipeline, KMeans, McaEncoder, StandardScaler};
use crate::survey::CategoryCatalog;

/// Default file names inside the assets directory.
pub mod defaults {
    /// Question prompts.
    pub const QUESTIONS: &str = "questions.json";
    /// Category options table.
    pub const CATEGORIES: &str = "ui_categories.csv";
    /// Encoding transform.
    pub const ENCODER: &str = "mca_transformer.json";
    /// Scaling transform.
    pub const SCALER: &str = "scaler.json";
    /// Clustering model.
    pub const CLUSTERER: &str = "kmeans_model.json";
    /// Interpretation map.
    pub const INTERPRETATIONS: &str = "interpretations.json";
    /// Cluster profile table.
    pub const PROFILES: &str = "cluster_profiles.csv";
}

/// Paths of every artifact the application needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Question prompts (`questions.json`).
    pub questions: PathBuf,
    /// Category options table (`ui_categories.csv`).
    pub categories: PathBuf,
    /// Encoding transform artifact.
    pub encoder: PathBuf,
    /// Scaling transform artifact.
    pub scaler: PathBuf,
    /// Clustering model artifact.
    pub clusterer: PathBuf,
    /// Interpretation map.
    pub interpretations: PathBuf,
    /// Cluster profile table.
    pub profiles: PathBuf,
}

impl AppConfig {
    /// Configuration using the default file names under `dir`.
    #[must_use]
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            questions: dir.join(defaults::QUESTIONS),
            categories: dir.join(defaults::CATEGORIES),
            encoder: dir.join(defaults::ENCODER),
            scaler: dir.join(defaults::SCALER),
            clusterer: dir.join(defaults::CLUSTERER),
            interpretations: dir.join(defaults::INTERPRETATIONS),
            profiles: dir.join(defaults::PROFILES),
        }
    }

    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for [`AppConfig`].
///
/// Unset paths resolve against the assets directory (default `assets`).
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    assets_dir: Option<PathBuf>,
    questions: Option<PathBuf>,
    categories: Option<PathBuf>,
    encoder: Option<PathBuf>,
    scaler: Option<PathBuf>,
    clusterer: Option<PathBuf>,
    interpretations: Option<PathBuf>,
    profiles: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the directory default file names resolve against.
    #[must_use]
    pub fn assets_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(path.into());
        self
    }

    /// Override the question prompts path.
    #[must_use]
    pub fn questions(mut self, path: impl Into<PathBuf>) -> Self {
        self.questions = Some(path.into());
        self
    }

    /// Override the category table path.
    #[must_use]
    pub fn categories(mut self, path: impl Into<PathBuf>) -> Self {
        self.categories = Some(path.into());
        self
    }

    /// Override the encoder artifact path.
    #[must_use]
    pub fn encoder(mut self, path: impl Into<PathBuf>) -> Self {
        self.encoder = Some(path.into());
        self
    }

    /// Override the scaler artifact path.
    #[must_use]
    pub fn scaler(mut self, path: impl Into<PathBuf>) -> Self {
        self.scaler = Some(path.into());
        self
    }

    /// Override the clustering model path.
    #[must_use]
    pub fn clusterer(mut self, path: impl Into<PathBuf>) -> Self {
        self.clusterer = Some(path.into());
        self
    }

    /// Override the interpretation map path.
    #[must_use]
    pub fn interpretations(mut self, path: impl Into<PathBuf>) -> Self {
        self.interpretations = Some(path.into());
        self
    }

    /// Override the cluster profile table path.
    #[must_use]
    pub fn profiles(mut self, path: impl Into<PathBuf>) -> Self {
        self.profiles = Some(path.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        let base = AppConfig::from_dir(self.assets_dir.unwrap_or_else(|| PathBuf::from("assets")));
        AppConfig {
            questions: self.questions.unwrap_or(base.questions),
            categories: self.categories.unwrap_or(base.categories),
            encoder: self.encoder.unwrap_or(base.encoder),
            scaler: self.scaler.unwrap_or(base.scaler),
            clusterer: self.clusterer.unwrap_or(base.clusterer),
            interpretations: self.interpretations.unwrap_or(base.interpretations),
            profiles: self.profiles.unwrap_or(base.profiles),
        }
    }
}

/// Everything loaded at startup.
#[derive(Debug)]
pub struct AppState {
    /// Survey questions and their domains.
    pub catalog: CategoryCatalog,
    /// Encode → scale → assign pipeline.
    pub pipeline: InferencePipeline,
    /// Cluster id → interpretation.
    pub interpretations: InterpretationMap,
    /// Cluster id → descriptive profile row.
    pub profiles: ClusterProfiles,
}

impl AppState {
    /// Load and cross-check every artifact. Any failure is fatal.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let catalog = CategoryCatalog::load(&config.questions, &config.categories)?;
        let encoder = McaEncoder::load(&config.encoder)?;
        check_encoder_covers_catalog(&encoder, &catalog)?;
        let pipeline = InferencePipeline::new(
            Box::new(encoder),
            Box::new(StandardScaler::load(&config.scaler)?),
            Box::new(KMeans::load(&config.clusterer)?),
        )?;
        let interpretations = InterpretationMap::load(&config.interpretations)?;
        let profiles = ClusterProfiles::load(&config.profiles)?;

        let state = Self::from_parts(catalog, pipeline, interpretations, profiles)?;
        info!(
            questions = state.catalog.questions().len(),
            clusters = state.pipeline.n_clusters(),
            "Application state ready"
        );
        Ok(state)
    }

    /// Assemble state from already-loaded parts, running the cross checks
    /// that do not need the concrete encoder.
    pub fn from_parts(
        catalog: CategoryCatalog,
        pipeline: InferencePipeline,
        interpretations: InterpretationMap,
        profiles: ClusterProfiles,
    ) -> Result<Self> {
        interpretations.validate_against(pipeline.n_clusters())?;
        for id in 0..pipeline.n_clusters() {
            if profiles.profile(id).is_none() {
                warn!(cluster = id, "No profile row for cluster");
            }
        }
        Ok(Self {
            catalog,
            pipeline,
            interpretations,
            profiles,
        })
    }
}

/// Every question and domain value offered by the form must be known to the
/// encoder, otherwise a valid submission could fail at inference time.
fn check_encoder_covers_catalog(encoder: &McaEncoder, catalog: &CategoryCatalog) -> Result<()> {
    for question in catalog.questions() {
        for value in &question.domain {
            if !encoder.knows(&question.id, value) {
                return Err(Error::Config(format!(
                    "encoder has no category '{value}' for question '{}'",
                    question.id
                )));
            }
        }
    }
    if encoder.questions().len() != catalog.questions().len() {
        return Err(Error::Config(format!(
            "encoder was fitted on {} questions, survey has {}",
            encoder.questions().len(),
            catalog.questions().len()
        )));
    }
    Ok(())
}
