//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json` and then prints exactly one of these
//! envelopes to stdout instead of colored text.

use rigsmith_rig::RigError;
use rigsmith_spec::{ArmatureDocument, ValidationError};
use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// CLI-level failures use `CLI_XXX`; validation failures pass through their
/// `EXXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Weight list is malformed
    pub const INVALID_WEIGHTS: &str = "CLI_004";
    /// Synthesis failed for a reason without a validation code
    pub const GENERATION_ERROR: &str = "CLI_010";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Offending field or bone (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let json = JsonError::new(error.code.code(), error.message.clone());
    match &error.path {
        Some(path) => json.with_path(path.clone()),
        None => json,
    }
}

pub fn input_error_to_json(error: &InputError) -> JsonError {
    JsonError::new(error.code(), error.to_string()).with_file(error.path().display().to_string())
}

/// Converts a synthesis failure into one entry per underlying problem.
pub fn rig_error_to_json(error: &RigError) -> Vec<JsonError> {
    let errors = error.validation_errors();
    if errors.is_empty() {
        vec![JsonError::new(error_codes::GENERATION_ERROR, error.to_string())]
    } else {
        errors.iter().map(validation_error_to_json).collect()
    }
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
    /// BLAKE3 hash of the parameter file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Generation result details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Canonical hash of the parameter set
    pub params_hash: String,
    pub bone_count: usize,
    pub mapped_count: usize,
    /// Where the document was written, if a path was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// The document itself when no output path was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<ArmatureDocument>,
    pub duration_ms: u64,
}

impl GenerateOutput {
    pub fn success(result: GenerateResult, source_hash: String) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
            source_hash: Some(source_hash),
        }
    }

    pub fn failure(errors: Vec<JsonError>, source_hash: Option<String>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
            source_hash,
        }
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    /// Hashes of the validated files, by role ("params", "mapping")
    pub source_hashes: Vec<(String, String)>,
}

/// JSON output for the `weights` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<WeightsResult>,
}

/// Normalized weights as stored in `f64` and as written in `f32`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsResult {
    pub input: [f64; 4],
    pub normalized: [f64; 4],
    pub transport: [f32; 4],
    /// Exact sum of the normalized weights minus one
    pub residual: f64,
}

/// One row of the `params` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamRow {
    pub name: String,
    pub default: f64,
    pub min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub description: String,
}
