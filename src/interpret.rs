//! Cluster interpretations and the cluster profile table.
//!
//! Both are deployed resources keyed by cluster id. The interpretation map
//! must cover every label the pipeline can produce; the profile table is
//! informational and may be incomplete.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact::{csv_reader, find_header_index, read_json};
use crate::error::{Error, Result};

/// Canned text shown for one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInterpretation {
    /// Cluster label this entry describes.
    pub id: usize,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Suggestions in display order.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct InterpretationFile {
    clusters: Vec<ClusterInterpretation>,
}

/// Total mapping from cluster id to its interpretation.
#[derive(Debug, Clone)]
pub struct InterpretationMap {
    entries: BTreeMap<usize, ClusterInterpretation>,
}

impl InterpretationMap {
    /// Load the map from `interpretations.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file: InterpretationFile = read_json(path)?;
        let map = Self::from_entries(file.clusters).map_err(|e| Error::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!(clusters = map.len(), path = %path.display(), "Loaded interpretations");
        Ok(map)
    }

    /// Build a map, rejecting duplicate ids and entries with empty text.
    pub fn from_entries(entries: Vec<ClusterInterpretation>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.title.trim().is_empty() || entry.description.trim().is_empty() {
                return Err(Error::Config(format!("cluster {} has empty text", entry.id)));
            }
            if entry.suggestions.is_empty() {
                return Err(Error::Config(format!("cluster {} has no suggestions", entry.id)));
            }
            let id = entry.id;
            if map.insert(id, entry).is_some() {
                return Err(Error::Config(format!("duplicate interpretation for cluster {id}")));
            }
        }
        Ok(Self { entries: map })
    }

    /// Check the map covers exactly the labels `0..n_clusters`.
    pub fn validate_against(&self, n_clusters: usize) -> Result<()> {
        if let Some(missing) = (0..n_clusters).find(|id| !self.entries.contains_key(id)) {
            return Err(Error::Config(format!(
                "no interpretation for cluster {missing} (model has {n_clusters} clusters)"
            )));
        }
        if let Some(extra) = self.entries.keys().find(|id| **id >= n_clusters) {
            return Err(Error::Config(format!(
                "interpretation for cluster {extra} but model has only {n_clusters} clusters"
            )));
        }
        Ok(())
    }

    /// Interpretation for a cluster id.
    pub fn interpretation(&self, cluster_id: usize) -> Result<&ClusterInterpretation> {
        self.entries
            .get(&cluster_id)
            .ok_or(Error::UnknownCluster(cluster_id))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One row of the profile table, without the key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterProfile {
    /// Cluster id.
    pub cluster: usize,
    /// `(column, value)` pairs in table order.
    pub fields: Vec<(String, String)>,
}

/// Descriptive statistics per cluster, displayed verbatim.
#[derive(Debug, Clone, Default)]
pub struct ClusterProfiles {
    headers: Vec<String>,
    rows: BTreeMap<usize, Vec<String>>,
}

impl ClusterProfiles {
    /// Name of the key column.
    pub const KEY_COLUMN: &'static str = "Cluster";

    /// Load the profile table from CSV.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv_reader(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

        let key_idx = find_header_index(&header_refs, Self::KEY_COLUMN).ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: Self::KEY_COLUMN.to_string(),
        })?;

        let mut rows = BTreeMap::new();
        for (line_num, record) in reader.records().enumerate() {
            let record = record?;
            let key = record.get(key_idx).unwrap_or("");
            let cluster: usize = key.parse().map_err(|_| Error::Artifact {
                path: path.to_path_buf(),
                reason: format!("line {}: invalid cluster id '{key}'", line_num + 2),
            })?;
            let values: Vec<String> = (0..headers.len())
                .filter(|i| *i != key_idx)
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect();
            rows.insert(cluster, values);
        }

        let headers = headers
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != key_idx)
            .map(|(_, h)| h)
            .collect();

        info!(rows = rows.len(), path = %path.display(), "Loaded cluster profiles");
        Ok(Self { headers, rows })
    }

    /// Profile row for a cluster, if the table has one.
    #[must_use]
    pub fn profile(&self, cluster_id: usize) -> Option<ClusterProfile> {
        self.rows.get(&cluster_id).map(|values| ClusterProfile {
            cluster: cluster_id,
            fields: self.headers.iter().cloned().zip(values.iter().cloned()).collect(),
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: usize) -> ClusterInterpretation {
        ClusterInterpretation {
            id,
            title: format!("Cluster {id}"),
            description: "Steady. Calm.".to_string(),
            suggestions: vec!["Rest.".to_string()],
        }
    }

    #[test]
    fn test_lookup_and_unknown_cluster() {
        let map = InterpretationMap::from_entries(vec![entry(0), entry(1)]).unwrap();
        assert_eq!(map.interpretation(1).unwrap().title, "Cluster 1");
        assert!(matches!(map.interpretation(7), Err(Error::UnknownCluster(7))));
    }

    #[test]
    fn test_validate_against_cluster_count() {
        let map = InterpretationMap::from_entries(vec![entry(0), entry(1), entry(2)]).unwrap();
        map.validate_against(3).unwrap();
        assert!(map.validate_against(4).is_err());
        assert!(map.validate_against(2).is_err());
    }

    #[test]
    fn test_from_entries_rejects_bad_entries() {
        assert!(InterpretationMap::from_entries(vec![entry(0), entry(0)]).is_err());

        let mut no_suggestions = entry(0);
        no_suggestions.suggestions.clear();
        assert!(InterpretationMap::from_entries(vec![no_suggestions]).is_err());

        let mut blank = entry(0);
        blank.title = "  ".to_string();
        assert!(InterpretationMap::from_entries(vec![blank]).is_err());
    }

    #[test]
    fn test_profiles_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster_profiles.csv");
        std::fs::write(&path, "Size,Cluster,Summary\n138,0,Strained\n107,1,Withdrawn\n").unwrap();

        let profiles = ClusterProfiles::load(&path).unwrap();
        assert_eq!(profiles.len(), 2);
        let p = profiles.profile(1).unwrap();
        assert_eq!(
            p.fields,
            vec![
                ("Size".to_string(), "107".to_string()),
                ("Summary".to_string(), "Withdrawn".to_string()),
            ]
        );
        assert!(profiles.profile(5).is_none());
    }

    #[test]
    fn test_profiles_require_key_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster_profiles.csv");
        std::fs::write(&path, "Size,Summary\n138,Strained\n").unwrap();
        assert!(matches!(ClusterProfiles::load(&path), Err(Error::MissingColumn { .. })));
    }
}
