//! The data source: one JSON file read per load.
//!
//! The file must hold a JSON array; each element is normalized individually
//! and malformed elements are absorbed by the normalizer, never reported.
//! Failure here is the only load-level error the rest of the system sees.

use crate::model::customer::Customer;
use crate::normalize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a completed load delivers to the controller.
pub type LoadOutcome = Result<Vec<Customer>, LoadError>;

/// Why a load attempt failed. Terminal for that attempt; recoverable only by
/// loading again.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} must contain a JSON array of customer records")]
    NotAnArray { path: PathBuf },

    #[error("load interrupted before completion")]
    Interrupted,
}

impl LoadError {
    fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read and normalize the customer collection at `path`.
pub fn load_customers(path: &Path) -> LoadOutcome {
    let text = fs::read_to_string(path).map_err(|err| LoadError::read(path, err))?;
    let value: Value = serde_json::from_str(&text).map_err(|err| LoadError::parse(path, err))?;
    let Value::Array(items) = value else {
        return Err(LoadError::NotAnArray {
            path: path.to_path_buf(),
        });
    };
    tracing::debug!(path = %path.display(), count = items.len(), "loaded raw customer records");
    Ok(normalize::normalize_all(&items))
}
