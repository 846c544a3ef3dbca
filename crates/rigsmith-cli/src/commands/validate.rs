//! Validate command implementation
//!
//! Checks a parameter file against the declared slider ranges and/or a
//! humanoid mapping file against the VRM 0.x bone schema, without building
//! a rig.

use anyhow::{Context, Result};
use colored::Colorize;
use rigsmith_spec::validation::validate_params;
use rigsmith_spec::{HumanoidSchema, NameMapping, ValidationError};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{input_error_to_json, validation_error_to_json, JsonError, ValidateOutput};
use super::to_json_string;
use crate::input::{load_mapping, load_params};

/// Run the validate command
///
/// # Arguments
/// * `params_path` - Optional parameter JSON file
/// * `mapping_path` - Optional humanoid mapping JSON file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if every given file is valid, 1 otherwise
pub fn run(
    params_path: Option<&str>,
    mapping_path: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        let (output, code) = validate_json(params_path, mapping_path);
        println!("{}", to_json_string(&output)?);
        Ok(code)
    } else {
        run_human(params_path, mapping_path)
    }
}

/// Checks a mapping against the VRM 0.x schema.
pub fn check_mapping(mapping: &NameMapping) -> Vec<ValidationError> {
    HumanoidSchema::vrm0()
        .validate(mapping)
        .iter()
        .map(|v| v.to_validation_error())
        .collect()
}

fn print_errors(errors: &[ValidationError]) {
    for e in errors {
        let path = e
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!("  {} [{}]{}: {}", "x".red(), e.code, path.dimmed(), e.message);
    }
}

/// Run validate with human-readable (colored) output
fn run_human(params_path: Option<&str>, mapping_path: Option<&str>) -> Result<ExitCode> {
    let mut failed = false;

    if let Some(path) = params_path {
        println!("{} {}", "Validating params:".cyan().bold(), path);
        let loaded = load_params(Some(Path::new(path)))
            .with_context(|| format!("Failed to load parameters: {}", path))?;
        let result = validate_params(&loaded.params);
        if result.is_ok() {
            println!("  {} all sliders in range", "ok".green());
        } else {
            failed = true;
            print_errors(&result.errors);
        }
    }

    if let Some(path) = mapping_path {
        println!("{} {}", "Validating mapping:".cyan().bold(), path);
        let loaded = load_mapping(Path::new(path))
            .with_context(|| format!("Failed to load mapping: {}", path))?;
        let errors = check_mapping(&loaded.mapping);
        if errors.is_empty() {
            println!(
                "  {} {} humanoid bones mapped",
                "ok".green(),
                loaded.mapping.len()
            );
        } else {
            failed = true;
            print_errors(&errors);
        }
    }

    if failed {
        println!("\n{} Validation failed", "FAILED".red().bold());
        Ok(ExitCode::from(1))
    } else {
        println!("\n{} Input is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    }
}

/// Builds the JSON envelope for a validate run.
pub fn validate_json(
    params_path: Option<&str>,
    mapping_path: Option<&str>,
) -> (ValidateOutput, ExitCode) {
    let mut errors: Vec<JsonError> = Vec::new();
    let mut source_hashes = Vec::new();

    if let Some(path) = params_path {
        match load_params(Some(Path::new(path))) {
            Ok(loaded) => {
                source_hashes.push(("params".to_string(), loaded.source_hash));
                errors.extend(
                    validate_params(&loaded.params)
                        .errors
                        .iter()
                        .map(|e| validation_error_to_json(e).with_file(path)),
                );
            }
            Err(e) => errors.push(input_error_to_json(&e)),
        }
    }

    if let Some(path) = mapping_path {
        match load_mapping(Path::new(path)) {
            Ok(loaded) => {
                source_hashes.push(("mapping".to_string(), loaded.source_hash));
                errors.extend(
                    check_mapping(&loaded.mapping)
                        .iter()
                        .map(|e| validation_error_to_json(e).with_file(path)),
                );
            }
            Err(e) => errors.push(input_error_to_json(&e)),
        }
    }

    let success = errors.is_empty();
    let code = if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };
    (
        ValidateOutput {
            success,
            errors,
            source_hashes,
        },
        code,
    )
}
