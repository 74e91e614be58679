//! Sample dataset loaded into the store at startup

use serde::{Deserialize, Serialize};

use super::models::{Document, Translation};
use crate::errors::{AppError, Result};

const EMBEDDED_SAMPLE: &str = include_str!("../../data/sample-data.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleData {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl SampleData {
    /// The dataset compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_SAMPLE)
    }

    /// Read a dataset from a JSON file
    pub async fn from_path(path: &str) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| AppError::Configuration {
            message: format!("Failed to read seed file {}: {}", path, e),
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(Into::into)
    }
}
