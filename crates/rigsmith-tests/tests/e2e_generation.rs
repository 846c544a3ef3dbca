//! End-to-end generation tests: sliders in, rig + mapping + document out.

use pretty_assertions::assert_eq;
use rigsmith_rig::math::{approx_eq, mirror_x};
use rigsmith_rig::{synthesize, Proportions, RigError};
use rigsmith_spec::{ArmatureDocument, HumanoidSchema, ParameterSet};
use rigsmith_tests::fixtures::{chibi_params, default_armature};

#[test]
fn default_head_size() {
    let p = Proportions::solve(&ParameterSet::default());
    assert!((p.head_size - 0.2125).abs() < 1e-12);
}

#[test]
fn rig_is_a_single_tree() {
    let armature = default_armature();
    let rig = armature.rig();
    let roots: Vec<&str> = rig
        .iter()
        .filter(|b| b.parent.is_none())
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(roots, vec!["root"]);
    for bone in rig.iter() {
        let id = rig.id_of(&bone.name).unwrap();
        let depth = rig.ancestors(id).count();
        assert!(depth < rig.len());
        if bone.name != "root" {
            assert_eq!(rig.ancestors(id).last().unwrap().name, "root");
        }
    }
}

#[test]
fn mirrored_pairs_are_symmetric() {
    let armature = chibi_params();
    let armature = synthesize(&armature).unwrap();
    let rig = armature.rig();
    let mut pairs = 0;
    for left in rig.iter().filter(|b| b.name.ends_with("_L")) {
        let right_name = format!("{}_R", left.name.trim_end_matches("_L"));
        let right = rig.find(&right_name).unwrap();
        assert!(approx_eq(mirror_x(left.head), right.head, 1e-12), "{}", left.name);
        assert!(approx_eq(mirror_x(left.tail), right.tail, 1e-12), "{}", left.name);
        assert!((left.length() - right.length()).abs() < 1e-12);
        assert_eq!(left.radius, right.radius);
        pairs += 1;
    }
    // eye, 4 leg, 4 arm, 5 fingers * 4 segments
    assert_eq!(pairs, 1 + 4 + 4 + 20);
}

#[test]
fn default_finger_ratios() {
    let armature = default_armature();
    let rig = armature.rig();
    let len = |name: &str| rig.find(name).unwrap().length();

    let proximal = len("finger_middle_proximal_L");
    let intermediate = len("finger_middle_intermediate_L");
    let distal = len("finger_middle_distal_L");
    assert!((intermediate / proximal - 0.75).abs() < 1e-9);
    assert!((distal / intermediate - 0.75).abs() < 1e-9);

    let hand_size = armature.proportions().hand_size;
    assert!((proximal + intermediate + distal - hand_size / 2.0).abs() < 1e-12);
}

#[test]
fn thumb_is_splayed_forward() {
    let armature = default_armature();
    let rig = armature.rig();
    let thumb = rig.find("finger_thumbs_proximal_L").unwrap();
    let dx = thumb.tail[0] - thumb.head[0];
    let dy = thumb.tail[1] - thumb.head[1];
    // -45 degrees: equal parts +X and -Y.
    assert!((dx + dy).abs() < 1e-12);
    assert!(dx > 0.0);
    assert_eq!(thumb.roll_degrees(), 0.0);

    let right = rig.find("finger_thumbs_distal_R").unwrap();
    assert!((right.roll_degrees() - 180.0).abs() < 1e-9);
    // Other fingers keep pointing straight along X.
    let index = rig.find("finger_index_distal_R").unwrap();
    assert_eq!(index.head[1], index.tail[1]);
}

#[test]
fn default_mapping_is_valid() {
    let armature = default_armature();
    let schema = HumanoidSchema::vrm0();
    assert!(schema.validate(armature.mapping()).is_empty());
    for name in schema.required_bone_names() {
        let rig_bone = armature.mapping().get(name).unwrap();
        assert!(armature.rig().find(rig_bone).is_some());
    }
    assert_eq!(armature.mapping().get("leftUpperArm"), Some("Arm_L"));
    assert_eq!(armature.mapping().get("rightLowerArm"), Some("forearm_R"));
    assert_eq!(armature.mapping().get("leftToes"), Some("Toes_L"));
    assert_eq!(
        armature.mapping().get("rightLittleDistal"),
        Some("finger_little_distal_R")
    );
    assert!(!armature.mapping().contains("upperChest"));
    assert!(!armature.mapping().contains("jaw"));
}

#[test]
fn chibi_with_nails() {
    let armature = synthesize(&chibi_params()).unwrap();
    assert_eq!(armature.rig().len(), 64);
    let nail = armature.rig().find("finger_index_nail_L").unwrap();
    let distal = armature.rig().find("finger_index_distal_L").unwrap();
    assert!((nail.length() - distal.length()).abs() < 1e-12);
    assert_eq!(nail.head, distal.tail);
}

#[test]
fn out_of_range_sliders_are_batched() {
    let params = ParameterSet {
        head_ratio: 3.0,
        head_width_ratio: 1.5,
        eye_depth: 0.02,
        leg_size: 0.0,
        ..Default::default()
    };
    match synthesize(&params) {
        Err(RigError::ParameterRange(errors)) => {
            let paths: Vec<&str> = errors.iter().filter_map(|e| e.path.as_deref()).collect();
            assert_eq!(
                paths,
                vec!["head_ratio", "head_width_ratio", "eye_depth", "leg_size"]
            );
        }
        other => panic!("expected ParameterRange, got {other:?}"),
    }
}

#[test]
fn short_head_long_legs_collapse_the_torso() {
    // Every slider is in range, but the hips end above the neck.
    let params = ParameterSet {
        head_ratio: 4.0,
        leg_length_ratio: 0.6,
        aging_ratio: 1.0,
        ..Default::default()
    };
    match synthesize(&params) {
        Err(RigError::Geometry { quantity, value }) => {
            assert_eq!(quantity, "backbone_length");
            assert!((value - (-0.2054166666666667)).abs() < 1e-9, "{value}");
        }
        other => panic!("expected Geometry, got {other:?}"),
    }
}

#[test]
fn non_finite_slider_is_rejected() {
    let params = ParameterSet {
        height: f64::NAN,
        ..Default::default()
    };
    let err = synthesize(&params).unwrap_err();
    assert_eq!(err.code(), "E002");
    assert!(err.is_recoverable());
}

#[test]
fn document_round_trips_through_json() {
    let doc = default_armature().to_document().unwrap();
    let json = doc.to_json(true).unwrap();
    let parsed = ArmatureDocument::from_json(&json).unwrap();
    assert_eq!(parsed.params_hash, doc.params_hash);
    assert_eq!(parsed.humanoid_bones, doc.humanoid_bones);
    assert_eq!(parsed.extensions, doc.extensions);
    let names = |d: &ArmatureDocument| d.bones.iter().map(|b| b.bone.clone()).collect::<Vec<_>>();
    assert_eq!(names(&parsed), names(&doc));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["humanoid_bones"]["hips"], "Hips");
    assert_eq!(value["extensions"]["springBones"][0]["stiffiness"], 1.0);
    assert_eq!(value["extensions"]["meta"]["licenseName"], "Redistribution_Prohibited");
}

#[test]
fn generation_is_deterministic() {
    let a = synthesize(&chibi_params()).unwrap().to_document().unwrap();
    let b = synthesize(&chibi_params()).unwrap().to_document().unwrap();
    assert_eq!(a.to_json(false).unwrap(), b.to_json(false).unwrap());
}
