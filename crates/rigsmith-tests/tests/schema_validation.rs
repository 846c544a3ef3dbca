//! Humanoid schema validation against generated and hand-edited mappings.

use pretty_assertions::assert_eq;
use rigsmith_spec::schema::{HIERARCHY, OPTIONAL_BONES, REQUIRED_BONES};
use rigsmith_spec::{ErrorCode, HumanoidSchema, NameMapping, SchemaViolation};
use rigsmith_tests::fixtures::default_mapping;

fn schema() -> HumanoidSchema {
    HumanoidSchema::vrm0()
}

#[test]
fn correct_mapping_has_no_violations() {
    assert_eq!(schema().validate(&default_mapping()), Vec::new());
}

#[test]
fn each_missing_required_bone_is_reported_alone() {
    let mapping = default_mapping();
    // Removing hips also splits the tree, so it is covered separately.
    for bone in REQUIRED_BONES.iter().filter(|b| **b != "hips") {
        let violations = schema().validate(&mapping.without(bone));
        assert_eq!(
            violations,
            vec![SchemaViolation::MissingRequired {
                bone: bone.to_string()
            }],
            "removing {bone}"
        );
    }
}

#[test]
fn missing_hips_also_splits_the_tree() {
    let violations = schema().validate(&default_mapping().without("hips"));
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].code(), ErrorCode::MissingRequiredBone);
    match &violations[1] {
        SchemaViolation::MultipleRoots { roots } => {
            assert_eq!(roots, &vec!["leftUpperLeg", "rightUpperLeg", "spine"]);
        }
        other => panic!("expected MultipleRoots, got {other}"),
    }
}

#[test]
fn unknown_key_yields_exactly_one_violation() {
    let mapping = default_mapping().with("tail", "Tail");
    let violations = schema().validate(&mapping);
    assert_eq!(
        violations,
        vec![SchemaViolation::Unrecognized {
            bone: "tail".to_string(),
            rig_bone: "Tail".to_string(),
        }]
    );
    let error = violations[0].to_validation_error();
    assert_eq!(error.code.code(), "E031");
    assert_eq!(error.path.as_deref(), Some("tail"));
}

#[test]
fn all_problems_reported_in_one_pass() {
    let mapping = default_mapping()
        .without("neck")
        .without("leftFoot")
        .with("wing", "Wing_L")
        .with("Hips", "Hips");
    let violations = schema().validate(&mapping);
    let codes: Vec<&str> = violations.iter().map(|v| v.code().code()).collect();
    assert_eq!(codes, vec!["E030", "E030", "E031", "E031"]);
}

#[test]
fn optional_bones_can_be_dropped() {
    let mut mapping = default_mapping();
    for bone in OPTIONAL_BONES {
        mapping = mapping.without(bone);
    }
    assert_eq!(mapping.len(), REQUIRED_BONES.len());
    assert!(schema().validate(&mapping).is_empty());
}

#[test]
fn hierarchy_covers_every_bone_once() {
    let schema = schema();
    for bone in REQUIRED_BONES.iter().chain(OPTIONAL_BONES) {
        let count = HIERARCHY.iter().filter(|(child, _)| child == bone).count();
        let expected = if *bone == "hips" { 0 } else { 1 };
        assert_eq!(count, expected, "{bone}");
        assert!(schema.is_known(bone));
    }
    assert_eq!(HIERARCHY.len(), REQUIRED_BONES.len() + OPTIONAL_BONES.len() - 1);
}

#[test]
fn mapping_file_format() {
    let mapping = NameMapping::from_json(r#"{"hips": "pelvis", "spine": "spine_01"}"#).unwrap();
    let violations = schema().validate(&mapping);
    assert!(violations
        .iter()
        .all(|v| matches!(v, SchemaViolation::MissingRequired { .. })));
    assert_eq!(violations.len(), REQUIRED_BONES.len() - 2);
}
