//! Weights command implementation
//!
//! Normalizes one vertex's four skin weights so they still sum to one after
//! the exporter stores them as 32-bit floats.

use anyhow::{bail, Result};
use colored::Colorize;
use rigsmith_rig::skin::{normalize, WeightQuad};
use std::process::ExitCode;

use super::json_output::{error_codes, JsonError, WeightsOutput, WeightsResult};
use super::to_json_string;

/// Run the weights command
///
/// # Arguments
/// * `weights` - Four comma-separated non-negative weights
/// * `json_output` - Whether to output machine-readable JSON diagnostics
pub fn run(weights: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        let (output, code) = weights_json(weights);
        println!("{}", to_json_string(&output)?);
        return Ok(code);
    }

    let result = compute(parse_weights(weights)?);
    println!("{} {:?}", "Input:".dimmed(), result.input);
    println!("{} {:?}", "Normalized:".cyan().bold(), result.normalized);
    println!("{} {:?}", "Stored (f32):".cyan().bold(), result.transport);
    let residual = format!("{:e}", result.residual);
    if result.residual.abs() <= f64::from(f32::EPSILON) {
        println!("{} {}", "Residual:".dimmed(), residual.green());
    } else {
        println!("{} {}", "Residual:".dimmed(), residual.yellow());
    }
    Ok(ExitCode::SUCCESS)
}

/// Parses `"a,b,c,d"` into a weight quad.
pub fn parse_weights(text: &str) -> Result<WeightQuad> {
    let values = text
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|e| anyhow::anyhow!("invalid weight '{}': {}", part, e))
        })
        .collect::<Result<Vec<f64>>>()?;

    let quad: WeightQuad = match values.as_slice() {
        [a, b, c, d] => [*a, *b, *c, *d],
        _ => bail!("expected 4 comma-separated weights, got {}", values.len()),
    };
    if let Some(bad) = quad.iter().find(|w| !w.is_finite() || **w < 0.0) {
        bail!("weights must be finite and non-negative, got {}", bad);
    }
    Ok(quad)
}

/// Normalizes a quad and reports how far its stored form is from one.
pub fn compute(input: WeightQuad) -> WeightsResult {
    let normalized = normalize(input);
    let transport = normalized.map(|w| w as f32);
    let residual = transport.iter().map(|w| f64::from(*w)).sum::<f64>() - 1.0;
    WeightsResult {
        input,
        normalized,
        transport,
        residual,
    }
}

/// Builds the JSON envelope for a weights run.
pub fn weights_json(text: &str) -> (WeightsOutput, ExitCode) {
    match parse_weights(text) {
        Ok(quad) => (
            WeightsOutput {
                success: true,
                errors: Vec::new(),
                result: Some(compute(quad)),
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            WeightsOutput {
                success: false,
                errors: vec![JsonError::new(error_codes::INVALID_WEIGHTS, e.to_string())],
                result: None,
            },
            ExitCode::from(1),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        assert_eq!(
            parse_weights("0.5, 0.25,0.25 ,0").unwrap(),
            [0.5, 0.25, 0.25, 0.0]
        );
        assert!(parse_weights("0.5,0.5").is_err());
        assert!(parse_weights("0.5,0.5,x,0").is_err());
        assert!(parse_weights("1.5,-0.5,0,0").is_err());
        assert!(parse_weights("NaN,0,0,0").is_err());
    }

    #[test]
    fn test_compute_residual_within_f32_epsilon() {
        let result = compute([0.7, 0.2, 0.05, 0.049]);
        assert!(result.residual.abs() <= f64::from(f32::EPSILON));
    }

    #[test]
    fn test_weights_json_error() {
        let (output, code) = weights_json("1,2,3");
        assert_eq!(code, ExitCode::from(1));
        assert_eq!(output.errors[0].code, "CLI_004");
        assert!(output.result.is_none());
    }
}
