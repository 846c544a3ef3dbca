//! Error types for armature synthesis.

use rigsmith_spec::{ErrorCode, SchemaViolation, SpecError, ValidationError};
use thiserror::Error;

/// Result type for synthesis operations.
pub type RigResult<T> = Result<T, RigError>;

/// Errors that can occur while synthesizing an armature.
#[derive(Debug, Error)]
pub enum RigError {
    /// One or more sliders are outside their declared range.
    #[error("parameter validation failed with {} error(s)", .0.len())]
    ParameterRange(Vec<ValidationError>),

    /// Two bones were registered under the same name.
    #[error("bone '{name}' is already registered")]
    DuplicateName { name: String },

    /// A parent handle does not belong to the rig under construction.
    #[error("parent of bone '{bone}' does not belong to this rig")]
    UnknownParent { bone: String },

    /// A bone does not reach the root through its parents.
    #[error("bone '{bone}' is not connected to root bone '{root}'")]
    DetachedBone { bone: String, root: String },

    /// The ledger names a rig bone that does not exist.
    #[error("ledger maps '{schema_bone}' to missing rig bone '{rig_bone}'")]
    DanglingReference {
        schema_bone: String,
        rig_bone: String,
    },

    /// A derived length is zero, negative, or not finite.
    #[error("degenerate geometry: {quantity} = {value}")]
    Geometry { quantity: String, value: f64 },

    /// The generated mapping does not satisfy the humanoid schema.
    #[error("humanoid mapping failed schema validation with {} violation(s)", .0.len())]
    SchemaViolations(Vec<SchemaViolation>),

    /// Hashing or serialization of the result failed.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl RigError {
    /// Creates a geometry error for a named derived quantity.
    pub fn geometry(quantity: impl Into<String>, value: f64) -> Self {
        Self::Geometry {
            quantity: quantity.into(),
            value,
        }
    }

    /// Returns the error code for this error, if it has one.
    ///
    /// Batch errors report the code of their first entry.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            RigError::ParameterRange(errors) => errors.first().map(|e| e.code),
            RigError::DuplicateName { .. } => Some(ErrorCode::DuplicateBoneName),
            RigError::UnknownParent { .. } => Some(ErrorCode::UnknownParentBone),
            RigError::DetachedBone { .. } => Some(ErrorCode::DetachedBone),
            RigError::DanglingReference { .. } => Some(ErrorCode::DanglingReference),
            RigError::Geometry { .. } => Some(ErrorCode::DegenerateGeometry),
            RigError::SchemaViolations(violations) => violations.first().map(|v| v.code()),
            RigError::Spec(_) => None,
        }
    }

    /// Returns the stable error code string (e.g., "E010").
    pub fn code(&self) -> &'static str {
        self.error_code().map(|c| c.code()).unwrap_or("RIG_000")
    }

    /// Returns true if the caller can fix the input and retry.
    ///
    /// Construction errors (duplicate names, dangling ledger entries,
    /// detached bones) are synthesizer bugs.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RigError::ParameterRange(_) | RigError::SchemaViolations(_) | RigError::Geometry { .. }
        )
    }

    /// Flattens the error into coded validation errors for reporting.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        match self {
            RigError::ParameterRange(errors) => errors.clone(),
            RigError::SchemaViolations(violations) => violations
                .iter()
                .map(SchemaViolation::to_validation_error)
                .collect(),
            RigError::Geometry { quantity, .. } => vec![ValidationError::with_path(
                ErrorCode::DegenerateGeometry,
                self.to_string(),
                quantity.as_str(),
            )],
            other => other
                .error_code()
                .map(|code| vec![ValidationError::new(code, other.to_string())])
                .unwrap_or_default(),
        }
    }
}
