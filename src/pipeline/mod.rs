//! Inference pipeline: encode → scale → assign.
//!
//! Each stage is a pre-fitted model loaded from a JSON artifact and exposed
//! through a narrow trait, so alternative artifact formats only need a new
//! adapter:
//!
//! - [`Encoder`]: categorical row → coordinate vector ([`McaEncoder`])
//! - [`Scaler`]: per-dimension affine rescaling ([`StandardScaler`])
//! - [`Clusterer`]: nearest-centroid assignment ([`KMeans`])
//!
//! ## Example
//!
//! ```rust,ignore
//! use wellness_cluster::pipeline::InferencePipeline;
//!
//! let pipeline = InferencePipeline::load(
//!     "assets/mca_transformer.json",
//!     "assets/scaler.json",
//!     "assets/kmeans_model.json",
//! )?;
//! let cluster = pipeline.assign_cluster(&record)?;
//! ```

mod clusterer;
mod encoder;
mod scaler;

use std::path::Path;

use tracing::{debug, info};

pub use clusterer::KMeans;
pub use encoder::{CategoryCoordinates, FittedQuestion, McaEncoder};
pub use scaler::StandardScaler;

use crate::error::{Error, Result};
use crate::survey::ResponseRecord;

/// A one-row table of categorical values, the input shape of an [`Encoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalRow {
    columns: Vec<String>,
    values: Vec<String>,
}

impl CategoricalRow {
    /// Lift a response record into a single row, one column per question.
    #[must_use]
    pub fn from_record(record: &ResponseRecord) -> Self {
        let (columns, values): (Vec<String>, Vec<String>) = record
            .iter()
            .map(|(q, v)| (q.to_string(), v.to_string()))
            .unzip();
        Self { columns, values }
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value in the named column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i].as_str())
    }
}

/// Maps a categorical row to a fixed-dimension coordinate vector.
pub trait Encoder: Send + Sync {
    /// Project a row. Fails on categories not seen at fit time.
    fn transform(&self, row: &CategoricalRow) -> Result<Vec<f64>>;

    /// Output dimensionality.
    fn n_components(&self) -> usize;
}

/// Rescales a coordinate vector.
pub trait Scaler: Send + Sync {
    /// Apply the fitted rescaling.
    fn transform(&self, vector: &[f64]) -> Result<Vec<f64>>;

    /// Input and output dimensionality.
    fn n_features(&self) -> usize;
}

/// Assigns a scaled vector to a cluster.
pub trait Clusterer: Send + Sync {
    /// Integer label of the assigned cluster.
    fn predict(&self, vector: &[f64]) -> Result<usize>;

    /// Number of clusters; labels are `0..n_clusters()`.
    fn n_clusters(&self) -> usize;

    /// Dimensionality of the centroid space.
    fn n_features(&self) -> usize;
}

/// The three chained stages, loaded once and shared read-only.
pub struct InferencePipeline {
    encoder: Box<dyn Encoder>,
    scaler: Box<dyn Scaler>,
    clusterer: Box<dyn Clusterer>,
}

impl std::fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("n_components", &self.encoder.n_components())
            .field("n_clusters", &self.clusterer.n_clusters())
            .finish()
    }
}

impl InferencePipeline {
    /// Assemble a pipeline, checking that stage dimensions line up.
    pub fn new(
        encoder: Box<dyn Encoder>,
        scaler: Box<dyn Scaler>,
        clusterer: Box<dyn Clusterer>,
    ) -> Result<Self> {
        if encoder.n_components() != scaler.n_features() {
            return Err(Error::Config(format!(
                "encoder produces {} components but scaler expects {}",
                encoder.n_components(),
                scaler.n_features()
            )));
        }
        if scaler.n_features() != clusterer.n_features() {
            return Err(Error::Config(format!(
                "scaler produces {} features but centroids have {}",
                scaler.n_features(),
                clusterer.n_features()
            )));
        }
        if clusterer.n_clusters() == 0 {
            return Err(Error::Config("clustering model has no centroids".to_string()));
        }
        Ok(Self { encoder, scaler, clusterer })
    }

    /// Load the JSON artifacts for the default stage implementations.
    pub fn load(
        encoder_path: impl AsRef<Path>,
        scaler_path: impl AsRef<Path>,
        clusterer_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let encoder = McaEncoder::load(encoder_path)?;
        let scaler = StandardScaler::load(scaler_path)?;
        let clusterer = KMeans::load(clusterer_path)?;
        info!(
            components = encoder.n_components(),
            clusters = clusterer.n_clusters(),
            "Loaded inference pipeline"
        );
        Self::new(Box::new(encoder), Box::new(scaler), Box::new(clusterer))
    }

    /// Run encode, scale and assign for one response record.
    ///
    /// Pure function of the record and the loaded artifacts.
    pub fn assign_cluster(&self, record: &ResponseRecord) -> Result<usize> {
        let row = CategoricalRow::from_record(record);
        let coords = self.encoder.transform(&row)?;
        debug!(?coords, "Encoded response");
        let scaled = self.scaler.transform(&coords)?;
        debug!(?scaled, "Scaled coordinates");
        let cluster = self.clusterer.predict(&scaled)?;
        info!(cluster, "Assigned cluster");
        Ok(cluster)
    }

    /// The encoder stage.
    #[must_use]
    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    /// Number of clusters the pipeline can produce.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.clusterer.n_clusters()
    }
}
