//! Error types for parameter validation and schema checks.

use thiserror::Error;

/// Stable error codes reported by validation and synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Parameter errors (E001-E009)
    /// E001: Parameter below its declared minimum or above its maximum
    ParameterOutOfRange,
    /// E002: Parameter is NaN or infinite
    ParameterNotFinite,

    // Construction errors (E010-E019)
    /// E010: Two bones registered under the same name
    DuplicateBoneName,
    /// E011: Parent reference does not belong to the rig
    UnknownParentBone,
    /// E012: Ledger names a bone that does not exist in the rig
    DanglingReference,
    /// E013: Bone is not connected to the root
    DetachedBone,

    // Geometry errors (E020-E029)
    /// E020: Derived length is zero, negative, or not finite
    DegenerateGeometry,

    // Schema errors (E030-E039)
    /// E030: Required humanoid bone has no mapping entry
    MissingRequiredBone,
    /// E031: Mapping key is not part of the humanoid vocabulary
    UnknownSchemaBone,
    /// E032: Hierarchy restricted to mapped bones contains a cycle
    HierarchyCycle,
    /// E033: Hierarchy restricted to mapped bones has more than one root
    MultipleHierarchyRoots,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::ParameterOutOfRange => "E001",
            ErrorCode::ParameterNotFinite => "E002",
            ErrorCode::DuplicateBoneName => "E010",
            ErrorCode::UnknownParentBone => "E011",
            ErrorCode::DanglingReference => "E012",
            ErrorCode::DetachedBone => "E013",
            ErrorCode::DegenerateGeometry => "E020",
            ErrorCode::MissingRequiredBone => "E030",
            ErrorCode::UnknownSchemaBone => "E031",
            ErrorCode::HierarchyCycle => "E032",
            ErrorCode::MultipleHierarchyRoots => "E033",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Name of the offending field (e.g., "head_ratio").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error bound to a field.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for parsing and hashing.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Canonicalization error.
    #[error("canonicalization error: {0}")]
    Canonicalization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a batch validation pass.
///
/// Every check runs; errors accumulate instead of stopping at the first one.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.ok {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
