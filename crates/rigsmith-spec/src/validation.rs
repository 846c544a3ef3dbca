//! Parameter validation.
//!
//! Range checks never clamp: an out-of-range slider is reported and
//! synthesis does not start. All sliders are checked in one pass so a caller
//! sees every problem at once.

use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::params::{ParamRange, ParameterSet};

/// Validates every scalar slider against its declared range.
///
/// # Example
/// ```
/// use rigsmith_spec::ParameterSet;
/// use rigsmith_spec::validation::validate_params;
///
/// let params = ParameterSet {
///     head_ratio: 3.0,
///     aging_ratio: 2.0,
///     ..Default::default()
/// };
///
/// let result = validate_params(&params);
/// assert!(!result.is_ok());
/// assert_eq!(result.errors.len(), 2);
/// ```
pub fn validate_params(params: &ParameterSet) -> ValidationResult {
    let mut result = ValidationResult::default();
    for (range, value) in params.scalars() {
        if let Err(err) = validate_in_range(range, value) {
            result.add_error(err);
        }
    }
    result
}

/// Checks one value against a declared range.
///
/// # Returns
/// * `Ok(())` if the value is finite and within the inclusive bounds
/// * `Err(ValidationError)` naming the field, the bounds, and the value
pub fn validate_in_range(range: &ParamRange, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::with_path(
            ErrorCode::ParameterNotFinite,
            format!("{} must be finite, got {}", range.name, value),
            range.name,
        ));
    }
    if value < range.min {
        return Err(ValidationError::with_path(
            ErrorCode::ParameterOutOfRange,
            format!("{} must be >= {}, got {}", range.name, range.min, value),
            range.name,
        ));
    }
    if let Some(max) = range.max {
        if value > max {
            return Err(ValidationError::with_path(
                ErrorCode::ParameterOutOfRange,
                format!("{} must be <= {}, got {}", range.name, max, value),
                range.name,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{EYE_DEPTH, HAND_RATIO};

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_params(&ParameterSet::default()).is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let params = ParameterSet {
            height: 0.1,
            hand_ratio: 2.5,
            finger_1_2_ratio: 0.2,
            leg_size: f64::NAN,
            ..Default::default()
        };
        let errors = validate_params(&params).into_result().unwrap_err();
        let paths: Vec<&str> = errors.iter().filter_map(|e| e.path.as_deref()).collect();
        assert_eq!(
            paths,
            vec!["height", "hand_ratio", "finger_1_2_ratio", "leg_size"]
        );
        assert_eq!(errors[3].code, ErrorCode::ParameterNotFinite);
    }

    #[test]
    fn test_message_reports_expected_and_actual() {
        let err = validate_in_range(&HAND_RATIO, 2.5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ParameterOutOfRange);
        assert!(err.message.contains("<= 2"));
        assert!(err.message.contains("2.5"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(validate_in_range(&EYE_DEPTH, 0.0).is_ok());
        assert!(validate_in_range(&EYE_DEPTH, -0.1).is_ok());
        assert!(validate_in_range(&EYE_DEPTH, 0.001).is_err());
    }
}
