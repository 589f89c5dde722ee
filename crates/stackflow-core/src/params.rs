//! CloudFormation parameter file model
//!
//! Parameter files are the standard CloudFormation JSON shape: an array of
//! `{"ParameterKey": ..., "ParameterValue": ...}` objects. A deployment
//! merges the static file with at most one dynamically resolved override
//! (the WAF stack's load-balancer ARN) before submission.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One CloudFormation parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "ParameterKey")]
    pub key: String,

    #[serde(rename = "ParameterValue")]
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Load a parameter file from disk
pub fn load_parameters(path: &Path) -> Result<Vec<Parameter>> {
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let params: Vec<Parameter> = serde_json::from_str(&content)
        .map_err(|e| CoreError::ParameterFile(format!("{}: {}", path.display(), e)))?;

    tracing::debug!("Loaded {} parameters from {}", params.len(), path.display());
    Ok(params)
}

/// Merge a dynamically resolved value into a parameter set
///
/// Replaces an existing key in place, otherwise appends.
pub fn merge_override(params: &mut Vec<Parameter>, key: &str, value: &str) {
    if let Some(existing) = params.iter_mut().find(|p| p.key == key) {
        existing.value = value.to_string();
    } else {
        params.push(Parameter::new(key, value));
    }
}

/// Render parameters as `aws cloudformation` shorthand arguments
pub fn to_cli_args(params: &[Parameter]) -> Vec<String> {
    params
        .iter()
        .map(|p| format!("ParameterKey={},ParameterValue={}", p.key, p.value))
        .collect()
}
