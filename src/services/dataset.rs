use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::models::Dataset;

/// Errors that can occur while loading a demographics dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in dataset {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a dataset from JSON text.
///
/// Records that break the dataset constraints (non-positive population,
/// negative values, more employed people than residents) are dropped with
/// a warning so they never reach the scorer.
pub fn parse_dataset(json: &str) -> Result<Dataset, serde_json::Error> {
    let mut dataset: Dataset = serde_json::from_str(json)?;

    dataset.retain(|name, record| match record.check() {
        Ok(()) => true,
        Err(reason) => {
            tracing::warn!("Dropping location {}: {}", name, reason);
            false
        }
    });

    Ok(dataset)
}

/// Load a dataset from a JSON file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            DatasetError::NotFound(path.to_path_buf())
        } else {
            DatasetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let dataset = parse_dataset(&contents).map_err(|source| DatasetError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Loaded {} locations from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Load a dataset, falling back to an empty one on failure
///
/// The failure is logged; downstream stages then run on empty input and
/// produce empty results.
pub fn load_dataset_or_empty<P: AsRef<Path>>(path: P) -> Dataset {
    match load_dataset(path) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("{}, continuing with an empty dataset", e);
            Dataset::new()
        }
    }
}
