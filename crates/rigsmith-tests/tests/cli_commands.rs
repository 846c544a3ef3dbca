//! CLI command functions exercised against files on disk.

use std::process::ExitCode;

use pretty_assertions::assert_eq;
use rigsmith_cli::commands::{generate, params, validate, weights};
use rigsmith_cli::input::load_params;
use rigsmith_spec::{canonical_params_hash, ArmatureDocument};
use rigsmith_tests::fixtures::write_file;
use tempfile::TempDir;

#[test]
fn generate_writes_a_loadable_document() {
    let dir = TempDir::new().unwrap();
    let params = write_file(&dir, "params.json", r#"{"height": 1.55, "nail_bone": true}"#);
    let out = dir.path().join("out.json");

    let (output, code) = generate::generate_json(params.to_str(), out.to_str(), true);
    assert_eq!(code, ExitCode::SUCCESS);
    let result = output.result.unwrap();
    assert_eq!(result.bone_count, 64);
    assert_eq!(result.output_path.as_deref(), out.to_str());

    let doc = ArmatureDocument::from_json(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert!((doc.params.height - 1.55).abs() < 1e-12);
    assert!((doc.bone("Head").unwrap().tail[2] - 1.55).abs() < 1e-12);

    // The stored hash matches a fresh hash of the same sliders.
    let loaded = load_params(Some(params.as_path())).unwrap();
    assert_eq!(result.params_hash, canonical_params_hash(&loaded.params).unwrap());
    assert_eq!(doc.params_hash, result.params_hash);
    assert_eq!(output.source_hash, Some(loaded.source_hash));
}

#[test]
fn generate_human_mode_writes_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("armature.json");
    let code = generate::run(None, out.to_str(), false, false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.exists());
}

#[test]
fn generate_rejects_unknown_slider() {
    let dir = TempDir::new().unwrap();
    let params = write_file(&dir, "params.json", r#"{"neck_length": 0.1}"#);
    let (output, code) = generate::generate_json(params.to_str(), None, false);
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(output.errors[0].code, "CLI_003");
    assert!(output.errors[0].file.is_some());
}

#[test]
fn generated_mapping_validates() {
    let dir = TempDir::new().unwrap();
    let (output, _) = generate::generate_json(None, None, false);
    let doc = output.result.unwrap().document.unwrap();
    let mapping_json = serde_json::to_string(&doc.humanoid_bones).unwrap();
    let mapping = write_file(&dir, "mapping.json", &mapping_json);

    let (output, code) = validate::validate_json(None, mapping.to_str());
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(output.errors.is_empty());
    assert_eq!(output.source_hashes[0].0, "mapping");
}

#[test]
fn validate_reports_each_problem() {
    let dir = TempDir::new().unwrap();
    let (output, _) = generate::generate_json(None, None, false);
    let doc = output.result.unwrap().document.unwrap();
    let broken = doc.humanoid_bones.without("leftHand").with("tail", "Tail");
    let mapping = write_file(&dir, "mapping.json", &serde_json::to_string(&broken).unwrap());

    let (output, code) = validate::validate_json(None, mapping.to_str());
    assert_eq!(code, ExitCode::from(1));
    let summary: Vec<(&str, Option<&str>)> = output
        .errors
        .iter()
        .map(|e| (e.code.as_str(), e.path.as_deref()))
        .collect();
    assert_eq!(
        summary,
        vec![("E030", Some("leftHand")), ("E031", Some("tail"))]
    );
}

#[test]
fn weights_command_normalizes() {
    let (output, code) = weights::weights_json("0.7,0.2,0.05,0.049");
    assert_eq!(code, ExitCode::SUCCESS);
    let result = output.result.unwrap();
    let stored: f64 = result.transport.iter().map(|w| f64::from(*w)).sum();
    assert!((stored - 1.0).abs() <= f64::from(f32::EPSILON));
    assert_eq!(result.input, [0.7, 0.2, 0.05, 0.049]);
}

#[test]
fn params_listing_covers_every_slider() {
    let rows = params::param_rows();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "height",
            "head_ratio",
            "head_width_ratio",
            "aging_ratio",
            "eye_depth",
            "shoulder_in_width",
            "shoulder_width",
            "arm_length_ratio",
            "hand_ratio",
            "finger_1_2_ratio",
            "finger_2_3_ratio",
            "leg_length_ratio",
            "leg_width_ratio",
            "leg_size",
        ]
    );
}
