//! The full synthesis pipeline.
//!
//! ```text
//! ParameterSet -> Proportions -> RigBuilder + FingerChainSynthesizer
//!              -> Rig + SynthesisLedger -> NameMapping -> HumanoidSchema check
//! ```

use rigsmith_spec::validation::validate_params;
use rigsmith_spec::{
    canonical_params_hash, extension_defaults, ArmatureDocument, HumanoidSchema, NameMapping,
    ParameterSet, DOCUMENT_VERSION,
};
use tracing::{debug, info};

use crate::builder::{BoneId, BoneKind, BonePair, Rig, RigBuilder};
use crate::error::{RigError, RigResult};
use crate::fingers::{FingerChain, FingerChainSynthesizer, Segment};
use crate::ledger::SynthesisLedger;
use crate::mapper::map_to_schema;
use crate::math::{offset_x, offset_z};
use crate::proportions::Proportions;

/// Envelope radius for bones with no anatomical size.
const DEFAULT_RADIUS: f64 = 0.1;

/// Length of the root bone, which stands at the origin.
const ROOT_LENGTH: f64 = 0.3;

/// A synthesized rig with its humanoid mapping.
#[derive(Debug, Clone)]
pub struct Armature {
    params: ParameterSet,
    proportions: Proportions,
    rig: Rig,
    mapping: NameMapping,
    ledger: SynthesisLedger,
}

impl Armature {
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn proportions(&self) -> &Proportions {
        &self.proportions
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Humanoid bone name to rig bone name.
    pub fn mapping(&self) -> &NameMapping {
        &self.mapping
    }

    pub fn ledger(&self) -> &SynthesisLedger {
        &self.ledger
    }

    /// Serializable form with the constant extension payloads attached.
    pub fn to_document(&self) -> RigResult<ArmatureDocument> {
        Ok(ArmatureDocument {
            document_version: DOCUMENT_VERSION,
            params_hash: canonical_params_hash(&self.params)?,
            params: self.params.clone(),
            root: self.rig.root().name.clone(),
            bones: self.rig.to_skeleton_bones(),
            humanoid_bones: self.mapping.clone(),
            extensions: extension_defaults().clone(),
        })
    }
}

/// Synthesizes an armature and checks it against the VRM 0.x schema.
///
/// # Example
/// ```
/// use rigsmith_rig::synthesize;
/// use rigsmith_spec::ParameterSet;
///
/// let armature = synthesize(&ParameterSet::default()).unwrap();
/// assert_eq!(armature.mapping().get("leftHand"), Some("hand_L"));
/// ```
pub fn synthesize(params: &ParameterSet) -> RigResult<Armature> {
    ArmatureSynthesizer::new(HumanoidSchema::vrm0()).synthesize(params)
}

/// Runs the pipeline against a chosen humanoid schema.
#[derive(Debug, Clone, Copy)]
pub struct ArmatureSynthesizer {
    schema: HumanoidSchema,
}

impl ArmatureSynthesizer {
    pub fn new(schema: HumanoidSchema) -> Self {
        Self { schema }
    }

    /// Validates the sliders, builds the rig, and maps it.
    ///
    /// # Errors
    /// * [`RigError::ParameterRange`] with every out-of-range slider
    /// * [`RigError::Geometry`] if a derived length or bone collapses
    /// * [`RigError::SchemaViolations`] if the mapping does not fit the schema
    pub fn synthesize(&self, params: &ParameterSet) -> RigResult<Armature> {
        if let Err(errors) = validate_params(params).into_result() {
            debug!(count = errors.len(), "parameter validation failed");
            return Err(RigError::ParameterRange(errors));
        }

        let proportions = Proportions::solve(params);
        debug!(
            head_size = proportions.head_size,
            hand_size = proportions.hand_size,
            backbone_length = proportions.backbone_length,
            "solved proportions"
        );

        let mut builder = RigBuilder::new();
        let mut ledger = SynthesisLedger::new();
        let root = build_body(&mut builder, &mut ledger, params, &proportions)?;
        debug!(bones = builder.len(), entries = ledger.len(), "built armature");

        proportions.check()?;
        let rig = builder.finish(root)?;

        let mapping = map_to_schema(&rig, &ledger)?;
        let violations = self.schema.validate(&mapping);
        if !violations.is_empty() {
            debug!(count = violations.len(), "humanoid mapping rejected");
            return Err(RigError::SchemaViolations(violations));
        }

        info!(
            bones = rig.len(),
            mapped = mapping.len(),
            "synthesized humanoid armature"
        );
        Ok(Armature {
            params: params.clone(),
            proportions,
            rig,
            mapping,
            ledger,
        })
    }
}

/// Lays out every bone and records the humanoid associations.
fn build_body(
    builder: &mut RigBuilder,
    ledger: &mut SynthesisLedger,
    params: &ParameterSet,
    p: &Proportions,
) -> RigResult<BoneId> {
    let height = p.height;
    let head_size = p.head_size;

    let root = builder.add_bone(
        "root",
        [0.0; 3],
        [0.0, 0.0, ROOT_LENGTH],
        None,
        DEFAULT_RADIUS,
        0.0,
    )?;

    // Torso
    let hips_tail = [0.0, 0.0, p.hips_height];
    let hips = builder.add_bone(
        "Hips",
        [0.0, 0.0, p.body_separate],
        hips_tail,
        Some(root),
        DEFAULT_RADIUS,
        90.0,
    )?;
    let spine_tail = offset_z(hips_tail, p.spine_length);
    let spine = builder.add_bone(
        "Spine",
        hips_tail,
        spine_tail,
        Some(hips),
        DEFAULT_RADIUS,
        -90.0,
    )?;
    let chest_tail = offset_z(hips_tail, p.backbone_length);
    let chest = builder.add_bone(
        "Chest",
        spine_tail,
        chest_tail,
        Some(spine),
        DEFAULT_RADIUS,
        -90.0,
    )?;
    let neck_top = height - head_size + p.neck_length / 2.0;
    let neck = builder.add_bone(
        "Neck",
        [0.0, 0.0, height - head_size - p.neck_length / 2.0],
        [0.0, 0.0, neck_top],
        Some(chest),
        DEFAULT_RADIUS,
        -90.0,
    )?;
    let head = builder.add_bone(
        "Head",
        [0.0, 0.0, neck_top],
        [0.0, 0.0, height],
        Some(neck),
        DEFAULT_RADIUS,
        -90.0,
    )?;
    for (schema_bone, rig_bone) in [
        ("hips", "Hips"),
        ("spine", "Spine"),
        ("chest", "Chest"),
        ("neck", "Neck"),
        ("head", "Head"),
    ] {
        ledger.record(schema_bone, rig_bone);
    }

    // Eyes
    let eye_x = head_size * params.head_width_ratio / 5.0;
    let eye_z = height - head_size / 2.0;
    builder.add_mirrored_pair(
        "eye",
        [eye_x, 0.0, eye_z],
        [eye_x, params.eye_depth, eye_z],
        BonePair::both(head),
        DEFAULT_RADIUS,
        BoneKind::Other,
    )?;
    ledger.record_pair("Eye", "eye");

    // Legs
    let lw = p.leg_width;
    let leg_radius = lw * 0.9;
    let hip_joint = [lw, 0.0, p.body_separate + head_size * 3.0 / 8.0];
    let knee = offset_z(hip_joint, -p.leg_bone_length);
    let ankle = [lw, 0.0, height * 0.05];
    let ball = [lw, -params.leg_size * (2.0 / 3.0), 0.0];
    let toe_tip = [lw, -params.leg_size, 0.0];
    let upper_legs = builder.add_mirrored_pair(
        "Upper_Leg",
        hip_joint,
        knee,
        BonePair::both(hips),
        leg_radius,
        BoneKind::Leg,
    )?;
    let lower_legs = builder.add_mirrored_pair(
        "Lower_Leg",
        knee,
        ankle,
        upper_legs,
        leg_radius,
        BoneKind::Leg,
    )?;
    let feet =
        builder.add_mirrored_pair("Foot", ankle, ball, lower_legs, leg_radius, BoneKind::Leg)?;
    builder.add_mirrored_pair("Toes", ball, toe_tip, feet, lw * 0.5, BoneKind::Leg)?;
    for (part, base) in [
        ("UpperLeg", "Upper_Leg"),
        ("LowerLeg", "Lower_Leg"),
        ("Foot", "Foot"),
        ("Toes", "Toes"),
    ] {
        ledger.record_pair(part, base);
    }

    // Arms
    let hand_size = p.hand_size;
    let arm_radius = hand_size * 0.4;
    let shoulder_head = offset_x(chest_tail, p.shoulder_in_pos);
    let shoulder_tail = offset_x(chest_tail, p.shoulder_in_pos + params.shoulder_width);
    let elbow = offset_x(shoulder_tail, p.arm_length);
    let wrist = offset_x(elbow, p.forearm_length);
    let hand_tip = offset_x(wrist, hand_size / 2.0);
    let shoulders = builder.add_mirrored_pair(
        "shoulder",
        shoulder_head,
        shoulder_tail,
        BonePair::both(chest),
        arm_radius,
        BoneKind::Arm,
    )?;
    let arms = builder.add_mirrored_pair(
        "Arm",
        shoulder_tail,
        elbow,
        shoulders,
        arm_radius,
        BoneKind::Arm,
    )?;
    let forearms =
        builder.add_mirrored_pair("forearm", elbow, wrist, arms, arm_radius, BoneKind::Arm)?;
    let hands = builder.add_mirrored_pair(
        "hand",
        wrist,
        hand_tip,
        forearms,
        hand_size / 4.0,
        BoneKind::Arm,
    )?;
    for (part, base) in [
        ("Shoulder", "shoulder"),
        ("UpperArm", "Arm"),
        ("LowerArm", "forearm"),
        ("Hand", "hand"),
    ] {
        ledger.record_pair(part, base);
    }

    // Fingers
    let synth = FingerChainSynthesizer::new(
        hands,
        hand_size,
        params.finger_1_2_ratio,
        params.finger_2_3_ratio,
        params.nail_bone,
    );
    let chains = synth.build_hand(builder, wrist, hand_tip)?;
    record_fingers(ledger, &chains);

    Ok(root)
}

fn record_fingers(ledger: &mut SynthesisLedger, chains: &[FingerChain]) {
    // Nails have no humanoid counterpart.
    for chain in chains {
        for segment in Segment::ALL {
            ledger.record_finger(chain.finger, segment);
        }
    }
}
