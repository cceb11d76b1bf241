//! K-means assignment against fitted centroids.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Clusterer;
use crate::artifact::read_json;
use crate::error::{Error, Result};

/// Pre-fitted k-means model. Only the centroids are needed for assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    cluster_centers: Vec<Vec<f64>>,
}

impl KMeans {
    /// Build a model from its centroids. All centroids must share one
    /// non-zero dimension.
    pub fn new(cluster_centers: Vec<Vec<f64>>) -> Result<Self> {
        let model = Self { cluster_centers };
        model.check()?;
        Ok(model)
    }

    /// Load a fitted model from its JSON artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model: Self = read_json(path)?;
        model.check().map_err(|e| Error::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(model)
    }

    fn check(&self) -> Result<()> {
        let Some(first) = self.cluster_centers.first() else {
            return Err(Error::Config("k-means model has no centroids".to_string()));
        };
        if first.is_empty() {
            return Err(Error::Config("k-means centroids are empty".to_string()));
        }
        for c in &self.cluster_centers {
            if c.len() != first.len() {
                return Err(Error::DimensionMismatch {
                    stage: "k-means",
                    expected: first.len(),
                    actual: c.len(),
                });
            }
        }
        Ok(())
    }

    /// The fitted centroids, indexed by label.
    #[must_use]
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.cluster_centers
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

impl Clusterer for KMeans {
    /// Nearest centroid by Euclidean distance. Ties go to the lowest label.
    fn predict(&self, vector: &[f64]) -> Result<usize> {
        if vector.len() != self.n_features() {
            return Err(Error::DimensionMismatch {
                stage: "k-means",
                expected: self.n_features(),
                actual: vector.len(),
            });
        }

        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (label, centroid) in self.cluster_centers.iter().enumerate() {
            let dist = squared_distance(vector, centroid);
            if dist < best_dist {
                best = label;
                best_dist = dist;
            }
        }

        if !best_dist.is_finite() {
            return Err(Error::Config(format!(
                "non-finite distance for input {vector:?}"
            )));
        }
        Ok(best)
    }

    fn n_clusters(&self) -> usize {
        self.cluster_centers.len()
    }

    fn n_features(&self) -> usize {
        self.cluster_centers.first().map_or(0, Vec::len)
    }
}
