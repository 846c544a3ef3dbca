//! Generate command implementation
//!
//! Synthesizes an armature from a parameter file and writes the armature
//! document (bones, humanoid mapping, default payloads) as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use rigsmith_rig::{synthesize, RigError};
use rigsmith_spec::ArmatureDocument;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

use super::json_output::{
    error_codes, input_error_to_json, rig_error_to_json, GenerateOutput, GenerateResult,
    JsonError,
};
use super::to_json_string;
use crate::input::{load_params, LoadedParams};

/// Run the generate command
///
/// # Arguments
/// * `params_path` - Path to a parameter JSON file (defaults when `None`)
/// * `output` - Path for the armature document (stdout when `None`)
/// * `pretty` - Pretty-print the document
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 if synthesis failed
pub fn run(
    params_path: Option<&str>,
    output: Option<&str>,
    pretty: bool,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(params_path, output, pretty)
    } else {
        run_human(params_path, output, pretty)
    }
}

/// Loads parameters and synthesizes the armature document.
///
/// The outer error is for input problems; the inner one for synthesis.
pub fn generate_document(
    params_path: Option<&str>,
) -> Result<(LoadedParams, Result<ArmatureDocument, RigError>)> {
    let loaded = load_params(params_path.map(Path::new))?;
    let document = synthesize(&loaded.params).and_then(|armature| armature.to_document());
    Ok((loaded, document))
}

fn write_document(document: &ArmatureDocument, output: &str, pretty: bool) -> Result<()> {
    let json = document
        .to_json(pretty)
        .context("Failed to serialize armature document")?;
    std::fs::write(output, json).with_context(|| format!("Failed to write output file: {}", output))
}

/// Run generate with human-readable (colored) output
fn run_human(params_path: Option<&str>, output: Option<&str>, pretty: bool) -> Result<ExitCode> {
    let start = Instant::now();

    let (loaded, document) = generate_document(params_path)
        .with_context(|| format!("Failed to load parameters: {}", params_path.unwrap_or("-")))?;

    // The document goes to stdout when no output path is given, so keep
    // status lines on stderr in that case.
    let status = |line: String| {
        if output.is_some() {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    };

    status(format!(
        "{} {}",
        "Generating:".cyan().bold(),
        loaded.source.describe()
    ));
    status(format!(
        "{} {}",
        "Source:".dimmed(),
        &loaded.source_hash[..16]
    ));

    let document = match document {
        Ok(document) => document,
        Err(err) => {
            status(format!("\n{} {}", "FAILED".red().bold(), err));
            for e in err.validation_errors() {
                let path = e
                    .path
                    .as_ref()
                    .map(|p| format!(" at {}", p))
                    .unwrap_or_default();
                status(format!(
                    "  {} [{}]{}: {}",
                    "x".red(),
                    e.code,
                    path.dimmed(),
                    e.message
                ));
            }
            return Ok(ExitCode::from(1));
        }
    };

    debug!(params_hash = %document.params_hash, "armature document ready");

    match output {
        Some(path) => write_document(&document, path, pretty)?,
        None => println!(
            "{}",
            document
                .to_json(pretty)
                .context("Failed to serialize armature document")?
        ),
    }

    status(format!(
        "\n{} {} bones, {} humanoid bones mapped ({}ms)",
        "SUCCESS".green().bold(),
        document.bones.len(),
        document.humanoid_bones.len(),
        start.elapsed().as_millis()
    ));
    if let Some(path) = output {
        status(format!("{} {}", "Output:".dimmed(), path));
    }

    Ok(ExitCode::SUCCESS)
}

/// Run generate with machine-readable JSON output
fn run_json(params_path: Option<&str>, output: Option<&str>, pretty: bool) -> Result<ExitCode> {
    let (result, code) = generate_json(params_path, output, pretty);
    println!("{}", to_json_string(&result)?);
    Ok(code)
}

/// Builds the JSON envelope for a generate run.
pub fn generate_json(
    params_path: Option<&str>,
    output: Option<&str>,
    pretty: bool,
) -> (GenerateOutput, ExitCode) {
    let start = Instant::now();

    let loaded = match load_params(params_path.map(Path::new)) {
        Ok(loaded) => loaded,
        Err(e) => {
            return (
                GenerateOutput::failure(vec![input_error_to_json(&e)], None),
                ExitCode::from(1),
            )
        }
    };

    let document = match synthesize(&loaded.params).and_then(|a| a.to_document()) {
        Ok(document) => document,
        Err(err) => {
            return (
                GenerateOutput::failure(rig_error_to_json(&err), Some(loaded.source_hash)),
                ExitCode::from(1),
            )
        }
    };

    if let Some(path) = output {
        if let Err(e) = write_document(&document, path, pretty) {
            let error =
                JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e)).with_file(path);
            return (
                GenerateOutput::failure(vec![error], Some(loaded.source_hash)),
                ExitCode::from(1),
            );
        }
    }

    let result = GenerateResult {
        params_hash: document.params_hash.clone(),
        bone_count: document.bones.len(),
        mapped_count: document.humanoid_bones.len(),
        output_path: output.map(str::to_string),
        duration_ms: start.elapsed().as_millis() as u64,
        document: if output.is_none() { Some(document) } else { None },
    };
    (
        GenerateOutput::success(result, loaded.source_hash),
        ExitCode::SUCCESS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_defaults_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("armature.json");
        let out_str = out.to_str().unwrap();

        let (output, code) = generate_json(None, Some(out_str), true);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(output.success);
        let result = output.result.unwrap();
        assert_eq!(result.bone_count, 54);
        assert_eq!(result.mapped_count, 53);
        assert!(result.document.is_none());

        let written = std::fs::read_to_string(&out).unwrap();
        let doc = ArmatureDocument::from_json(&written).unwrap();
        assert_eq!(doc.params_hash, result.params_hash);
    }

    #[test]
    fn test_generate_inline_document() {
        let (output, _) = generate_json(None, None, false);
        let doc = output.result.unwrap().document.unwrap();
        assert_eq!(doc.humanoid_bones.get("head"), Some("Head"));
    }

    #[test]
    fn test_generate_reports_range_errors() {
        let dir = TempDir::new().unwrap();
        let params = dir.path().join("params.json");
        std::fs::write(&params, r#"{"head_ratio": 2.0, "leg_length_ratio": 0.9}"#).unwrap();

        let (output, code) = generate_json(params.to_str(), None, false);
        assert_eq!(code, ExitCode::from(1));
        assert!(!output.success);
        assert_eq!(output.errors.len(), 2);
        assert!(output.errors.iter().all(|e| e.code == "E001"));
        assert!(output.source_hash.is_some());
    }

    #[test]
    fn test_generate_missing_params_file() {
        let (output, code) = generate_json(Some("/nonexistent/params.json"), None, false);
        assert_eq!(code, ExitCode::from(1));
        assert_eq!(output.errors[0].code, "CLI_001");
    }
}
