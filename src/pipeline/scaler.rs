//! Standardization: subtract the fitted mean, divide by the fitted scale.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Scaler;
use crate::artifact::read_json;
use crate::error::{Error, Result};

/// Pre-fitted per-dimension standardization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build a scaler. `mean` and `scale` must have equal, non-zero length
    /// and every scale must be finite and non-zero.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.check()?;
        Ok(scaler)
    }

    /// Load a fitted scaler from its JSON artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scaler: Self = read_json(path)?;
        scaler.check().map_err(|e| Error::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(scaler)
    }

    fn check(&self) -> Result<()> {
        if self.mean.is_empty() {
            return Err(Error::Config("scaler has no features".to_string()));
        }
        if self.mean.len() != self.scale.len() {
            return Err(Error::DimensionMismatch {
                stage: "scaler",
                expected: self.mean.len(),
                actual: self.scale.len(),
            });
        }
        if let Some(bad) = self.scale.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(Error::Config(format!("scaler has invalid scale {bad}")));
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, vector: &[f64]) -> Result<Vec<f64>> {
        if vector.len() != self.mean.len() {
            return Err(Error::DimensionMismatch {
                stage: "scaler",
                expected: self.mean.len(),
                actual: vector.len(),
            });
        }
        Ok(vector
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    fn n_features(&self) -> usize {
        self.mean.len()
    }
}
