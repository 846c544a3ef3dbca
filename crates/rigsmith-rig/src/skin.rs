//! Skin weight normalization for 32-bit float transport.
//!
//! Exported vertex weights are stored as four `f32` values that consumers
//! expect to sum to one. Normalizing in `f64` and then rounding can leave
//! the stored sum off by more than `f32::EPSILON`, so the normalizer
//! simulates the round trip and renormalizes the rounded values until the
//! error stops improving.

use tracing::warn;

/// Four bone weights of one vertex.
pub type WeightQuad = [f64; 4];

/// Upper bound on renormalization passes.
pub const MAX_ITERATIONS: usize = 10;

/// Rounds a value through `f32`, as a transport round trip would.
pub fn to_transport_precision(value: f64) -> f64 {
    value as f32 as f64
}

fn to_transport(weights: WeightQuad) -> WeightQuad {
    weights.map(to_transport_precision)
}

/// Compensated (Neumaier) summation.
///
/// Four `f32` values always sum exactly in `f64` unless their exponents are
/// far apart; compensation covers that case.
fn exact_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &v in values {
        let t = sum + v;
        if f64::abs(sum) >= f64::abs(v) {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

/// Returns weights that still sum to one after rounding to `f32`.
///
/// Input already summing to one within `f64::EPSILON` is returned
/// unchanged. Never fails: an all-zero quad comes back as zeros.
///
/// # Example
/// ```
/// use rigsmith_rig::skin::normalize;
///
/// let w = normalize([0.5, 0.3, 0.1, 0.05]);
/// let stored: f32 = w.iter().map(|v| *v as f32).sum();
/// assert!((stored - 1.0).abs() <= f32::EPSILON);
/// ```
pub fn normalize(weights: WeightQuad) -> WeightQuad {
    if (weights.iter().sum::<f64>() - 1.0).abs() < f64::EPSILON {
        return weights;
    }

    let mut current = to_transport(weights);
    for _ in 0..MAX_ITERATIONS {
        let plain_sum: f64 = current.iter().sum();
        let candidate = to_transport(current.map(|w| w / plain_sum));
        let error = (1.0 - exact_sum(&current)).abs();
        let next_error = (1.0 - exact_sum(&candidate)).abs();
        if error >= f64::EPSILON && error > next_error {
            current = candidate;
        } else {
            break;
        }
    }

    let residual = (1.0 - exact_sum(&current)).abs();
    if residual.is_nan() || residual > f64::from(f32::EPSILON) {
        warn!(?weights, residual, "skin weights did not converge to a unit sum");
    }
    current
}

/// Normalizes and returns the `f32` values written to the vertex buffer.
pub fn normalize_weights_f32(weights: WeightQuad) -> [f32; 4] {
    normalize(weights).map(|w| w as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_error(w: WeightQuad) -> f64 {
        (1.0 - exact_sum(&w)).abs()
    }

    #[test]
    fn test_unit_sum_returned_unchanged() {
        let w = [0.25, 0.25, 0.25, 0.25];
        assert_eq!(normalize(w), w);
        // Not representable in f32 exactly, but already sums to one.
        let w = [0.1, 0.9, 0.0, 0.0];
        assert_eq!(normalize(w), w);
    }

    #[test]
    fn test_skewed_weights_converge() {
        let w = normalize([0.7, 0.2, 0.05, 0.049]);
        assert!(stored_error(w) < f64::from(f32::EPSILON));
        assert!(w.iter().all(|v| *v == to_transport_precision(*v)));
    }

    #[test]
    fn test_nearly_one_plus_remainder_converges() {
        let input = [0.9999999, 0.3, 0.0, 0.0];
        let w = normalize(input);
        assert!(stored_error(w) < f64::from(f32::EPSILON));
        assert_eq!(&w[2..], &[0.0, 0.0]);
        assert!((w[0] / w[1] - input[0] / input[1]).abs() < 1e-5);
        assert_eq!(normalize(w), w);
    }

    #[test]
    fn test_single_influence() {
        assert_eq!(normalize([3.0, 0.0, 0.0, 0.0]), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize([0.6, 0.3, 0.2, 0.1]);
        assert_eq!(normalize(once), once);
    }

    #[test]
    fn test_all_zero_does_not_fail() {
        assert_eq!(normalize([0.0; 4]), [0.0; 4]);
    }

    #[test]
    fn test_f32_output() {
        let w = normalize_weights_f32([2.0, 1.0, 1.0, 0.0]);
        assert_eq!(w, [0.5, 0.25, 0.25, 0.0]);
    }

    #[test]
    fn test_exact_sum_compensates() {
        assert_eq!(exact_sum(&[1e16, 1.0, -1e16, 1.0]), 2.0);
    }
}
