//! VRM 0.x humanoid bone vocabulary.
//!
//! The schema is static reference data: a required bone set, an optional
//! bone set, and a child to parent table rooted implicitly at `hips`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::error::{ErrorCode, ValidationError};
use crate::mapping::NameMapping;

/// Bones every humanoid mapping must provide.
pub static REQUIRED_BONES: &[&str] = &[
    // Torso
    "hips",
    "spine",
    "chest",
    "neck",
    "head",
    // Legs
    "leftUpperLeg",
    "leftLowerLeg",
    "leftFoot",
    "rightUpperLeg",
    "rightLowerLeg",
    "rightFoot",
    // Arms
    "leftUpperArm",
    "leftLowerArm",
    "leftHand",
    "rightUpperArm",
    "rightLowerArm",
    "rightHand",
];

/// Bones a humanoid mapping may provide.
pub static OPTIONAL_BONES: &[&str] = &[
    "leftEye",
    "rightEye",
    "upperChest",
    "jaw",
    "leftToes",
    "rightToes",
    // Left arm
    "leftShoulder",
    "leftThumbProximal",
    "leftThumbIntermediate",
    "leftThumbDistal",
    "leftIndexProximal",
    "leftIndexIntermediate",
    "leftIndexDistal",
    "leftMiddleProximal",
    "leftMiddleIntermediate",
    "leftMiddleDistal",
    "leftRingProximal",
    "leftRingIntermediate",
    "leftRingDistal",
    "leftLittleProximal",
    "leftLittleIntermediate",
    "leftLittleDistal",
    // Right arm
    "rightShoulder",
    "rightThumbProximal",
    "rightThumbIntermediate",
    "rightThumbDistal",
    "rightIndexProximal",
    "rightIndexIntermediate",
    "rightIndexDistal",
    "rightMiddleProximal",
    "rightMiddleIntermediate",
    "rightMiddleDistal",
    "rightRingProximal",
    "rightRingIntermediate",
    "rightRingDistal",
    "rightLittleProximal",
    "rightLittleIntermediate",
    "rightLittleDistal",
];

/// Child to parent table. `hips` is the root and has no entry.
pub static HIERARCHY: &[(&str, &str)] = &[
    // Torso
    ("leftEye", "head"),
    ("rightEye", "head"),
    ("jaw", "head"),
    ("head", "neck"),
    ("neck", "upperChest"),
    ("upperChest", "chest"),
    ("chest", "spine"),
    ("spine", "hips"),
    // Right arm
    ("rightShoulder", "chest"),
    ("rightUpperArm", "rightShoulder"),
    ("rightLowerArm", "rightUpperArm"),
    ("rightHand", "rightLowerArm"),
    ("rightThumbProximal", "rightHand"),
    ("rightThumbIntermediate", "rightThumbProximal"),
    ("rightThumbDistal", "rightThumbIntermediate"),
    ("rightIndexProximal", "rightHand"),
    ("rightIndexIntermediate", "rightIndexProximal"),
    ("rightIndexDistal", "rightIndexIntermediate"),
    ("rightMiddleProximal", "rightHand"),
    ("rightMiddleIntermediate", "rightMiddleProximal"),
    ("rightMiddleDistal", "rightMiddleIntermediate"),
    ("rightRingProximal", "rightHand"),
    ("rightRingIntermediate", "rightRingProximal"),
    ("rightRingDistal", "rightRingIntermediate"),
    ("rightLittleProximal", "rightHand"),
    ("rightLittleIntermediate", "rightLittleProximal"),
    ("rightLittleDistal", "rightLittleIntermediate"),
    // Left arm
    ("leftShoulder", "chest"),
    ("leftUpperArm", "leftShoulder"),
    ("leftLowerArm", "leftUpperArm"),
    ("leftHand", "leftLowerArm"),
    ("leftThumbProximal", "leftHand"),
    ("leftThumbIntermediate", "leftThumbProximal"),
    ("leftThumbDistal", "leftThumbIntermediate"),
    ("leftIndexProximal", "leftHand"),
    ("leftIndexIntermediate", "leftIndexProximal"),
    ("leftIndexDistal", "leftIndexIntermediate"),
    ("leftMiddleProximal", "leftHand"),
    ("leftMiddleIntermediate", "leftMiddleProximal"),
    ("leftMiddleDistal", "leftMiddleIntermediate"),
    ("leftRingProximal", "leftHand"),
    ("leftRingIntermediate", "leftRingProximal"),
    ("leftRingDistal", "leftRingIntermediate"),
    ("leftLittleProximal", "leftHand"),
    ("leftLittleIntermediate", "leftLittleProximal"),
    ("leftLittleDistal", "leftLittleIntermediate"),
    // Left leg
    ("leftUpperLeg", "hips"),
    ("leftLowerLeg", "leftUpperLeg"),
    ("leftFoot", "leftLowerLeg"),
    ("leftToes", "leftFoot"),
    // Right leg
    ("rightUpperLeg", "hips"),
    ("rightLowerLeg", "rightUpperLeg"),
    ("rightFoot", "rightLowerLeg"),
    ("rightToes", "rightFoot"),
];

/// One problem found while validating a mapping against the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaViolation {
    /// A required bone has no entry.
    MissingRequired { bone: String },
    /// A mapping key is not part of the vocabulary.
    Unrecognized { bone: String, rig_bone: String },
    /// Mapped bones form a parent cycle, listed from the smallest name.
    Cycle { bones: Vec<String> },
    /// Mapped bones split into several trees.
    MultipleRoots { roots: Vec<String> },
}

impl SchemaViolation {
    /// Returns the stable error code for this violation.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchemaViolation::MissingRequired { .. } => ErrorCode::MissingRequiredBone,
            SchemaViolation::Unrecognized { .. } => ErrorCode::UnknownSchemaBone,
            SchemaViolation::Cycle { .. } => ErrorCode::HierarchyCycle,
            SchemaViolation::MultipleRoots { .. } => ErrorCode::MultipleHierarchyRoots,
        }
    }

    /// Converts to a coded validation error bound to the offending bone.
    pub fn to_validation_error(&self) -> ValidationError {
        match self {
            SchemaViolation::MissingRequired { bone }
            | SchemaViolation::Unrecognized { bone, .. } => {
                ValidationError::with_path(self.code(), self.to_string(), bone.as_str())
            }
            _ => ValidationError::new(self.code(), self.to_string()),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::MissingRequired { bone } => {
                write!(f, "required humanoid bone '{}' is not mapped", bone)
            }
            SchemaViolation::Unrecognized { bone, rig_bone } => write!(
                f,
                "'{}' (mapped to '{}') is not a humanoid bone name",
                bone, rig_bone
            ),
            SchemaViolation::Cycle { bones } => {
                write!(f, "mapped bones form a cycle: {}", bones.join(" -> "))
            }
            SchemaViolation::MultipleRoots { roots } => write!(
                f,
                "mapped bones have {} roots, expected 1: {}",
                roots.len(),
                roots.join(", ")
            ),
        }
    }
}

/// Parent of a mapped bone once unmapped intermediates are skipped.
enum InducedParent<'a> {
    Mapped(&'a str),
    Root,
    Cycle(Vec<String>),
}

/// A humanoid bone vocabulary with its hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct HumanoidSchema {
    required: &'static [&'static str],
    optional: &'static [&'static str],
    hierarchy: &'static [(&'static str, &'static str)],
}

impl HumanoidSchema {
    /// The VRM 0.x humanoid schema.
    pub const fn vrm0() -> Self {
        Self {
            required: REQUIRED_BONES,
            optional: OPTIONAL_BONES,
            hierarchy: HIERARCHY,
        }
    }

    /// Builds a schema from custom tables.
    pub const fn from_tables(
        required: &'static [&'static str],
        optional: &'static [&'static str],
        hierarchy: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            required,
            optional,
            hierarchy,
        }
    }

    /// Bones that must be mapped.
    pub fn required_bone_names(&self) -> &'static [&'static str] {
        self.required
    }

    /// Bones that may be mapped.
    pub fn optional_bone_names(&self) -> &'static [&'static str] {
        self.optional
    }

    /// Child to parent pairs.
    pub fn hierarchy(&self) -> &'static [(&'static str, &'static str)] {
        self.hierarchy
    }

    /// Returns true if the bone is required.
    pub fn is_required(&self, bone: &str) -> bool {
        self.required.contains(&bone)
    }

    /// Returns true if the bone is required or optional.
    pub fn is_known(&self, bone: &str) -> bool {
        self.is_required(bone) || self.optional.contains(&bone)
    }

    /// Returns the schema parent of a bone, or `None` for the root.
    pub fn parent_of(&self, bone: &str) -> Option<&'static str> {
        self.hierarchy
            .iter()
            .find(|(child, _)| *child == bone)
            .map(|(_, parent)| *parent)
    }

    /// Validates a mapping and returns every violation found.
    ///
    /// Checks that each required bone is present, that each key belongs to
    /// the vocabulary, and that the hierarchy restricted to the mapped bones
    /// is acyclic with a single root. Unmapped intermediate bones are
    /// skipped, so `neck` hangs off `chest` when `upperChest` is absent.
    ///
    /// # Example
    /// ```
    /// use rigsmith_spec::{HumanoidSchema, NameMapping, SchemaViolation};
    ///
    /// let schema = HumanoidSchema::vrm0();
    /// let mapping: NameMapping = [("hips", "Hips"), ("tail", "Tail")].into_iter().collect();
    ///
    /// let violations = schema.validate(&mapping);
    /// assert!(violations.contains(&SchemaViolation::MissingRequired { bone: "spine".into() }));
    /// assert!(violations.contains(&SchemaViolation::Unrecognized {
    ///     bone: "tail".into(),
    ///     rig_bone: "Tail".into(),
    /// }));
    /// ```
    pub fn validate(&self, mapping: &NameMapping) -> Vec<SchemaViolation> {
        let mut violations = Vec::new();

        for bone in self.required {
            if !mapping.contains(bone) {
                violations.push(SchemaViolation::MissingRequired {
                    bone: (*bone).to_string(),
                });
            }
        }

        for (bone, rig_bone) in mapping.iter() {
            if !self.is_known(bone) {
                violations.push(SchemaViolation::Unrecognized {
                    bone: bone.to_string(),
                    rig_bone: rig_bone.to_string(),
                });
            }
        }

        self.check_induced_hierarchy(mapping, &mut violations);
        violations
    }

    fn check_induced_hierarchy(
        &self,
        mapping: &NameMapping,
        violations: &mut Vec<SchemaViolation>,
    ) {
        let mapped: BTreeSet<&str> = mapping.schema_bones().filter(|b| self.is_known(b)).collect();

        let mut parents: BTreeMap<&str, &str> = BTreeMap::new();
        let mut roots = Vec::new();
        let mut cycles: BTreeSet<Vec<String>> = BTreeSet::new();

        for &bone in &mapped {
            match self.induced_parent(bone, &mapped) {
                InducedParent::Mapped(parent) => {
                    parents.insert(bone, parent);
                }
                InducedParent::Root => roots.push(bone.to_string()),
                InducedParent::Cycle(cycle) => {
                    cycles.insert(cycle);
                }
            }
        }

        // Cycles made entirely of mapped bones only show up in the induced graph.
        for &start in parents.keys() {
            let mut path: Vec<&str> = vec![start];
            let mut current = start;
            while let Some(&parent) = parents.get(current) {
                if let Some(pos) = path.iter().position(|&p| p == parent) {
                    cycles.insert(canonical_cycle(&path[pos..]));
                    break;
                }
                path.push(parent);
                current = parent;
            }
        }

        for bones in cycles {
            violations.push(SchemaViolation::Cycle { bones });
        }
        if roots.len() > 1 {
            violations.push(SchemaViolation::MultipleRoots { roots });
        }
    }

    /// Walks up the schema hierarchy until a mapped bone or the root.
    fn induced_parent<'a>(&self, bone: &'a str, mapped: &BTreeSet<&'a str>) -> InducedParent<'a> {
        let mut path: Vec<&str> = vec![bone];
        let mut current: &str = bone;
        loop {
            let Some(parent) = self.parent_of(current) else {
                return InducedParent::Root;
            };
            if let Some(pos) = path.iter().position(|&p| p == parent) {
                return InducedParent::Cycle(canonical_cycle(&path[pos..]));
            }
            if let Some(&mapped_parent) = mapped.get(parent) {
                return InducedParent::Mapped(mapped_parent);
            }
            path.push(parent);
            current = parent;
        }
    }
}

impl Default for HumanoidSchema {
    fn default() -> Self {
        Self::vrm0()
    }
}

/// Rotates a cycle so it starts at its smallest name.
fn canonical_cycle(cycle: &[&str]) -> Vec<String> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| **name)
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle[start..]
        .iter()
        .chain(cycle[..start].iter())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_mapping() -> NameMapping {
        REQUIRED_BONES
            .iter()
            .chain(OPTIONAL_BONES.iter())
            .map(|b| (*b, format!("rig_{}", b)))
            .collect()
    }

    #[test]
    fn test_hierarchy_covers_vocabulary_once() {
        let schema = HumanoidSchema::vrm0();
        let children: Vec<&str> = schema.hierarchy().iter().map(|(c, _)| *c).collect();
        let unique: BTreeSet<&str> = children.iter().copied().collect();
        assert_eq!(children.len(), unique.len());

        for bone in REQUIRED_BONES.iter().chain(OPTIONAL_BONES.iter()) {
            if *bone == "hips" {
                assert!(schema.parent_of(bone).is_none());
            } else {
                let parent = schema.parent_of(bone).unwrap();
                assert!(schema.is_known(parent), "{} has unknown parent {}", bone, parent);
            }
        }
        assert_eq!(unique.len(), REQUIRED_BONES.len() + OPTIONAL_BONES.len() - 1);
    }

    #[test]
    fn test_every_bone_reaches_hips() {
        let schema = HumanoidSchema::vrm0();
        for (child, _) in schema.hierarchy() {
            let mut current = *child;
            let mut steps = 0;
            while let Some(parent) = schema.parent_of(current) {
                current = parent;
                steps += 1;
                assert!(steps < 16, "runaway walk from {}", child);
            }
            assert_eq!(current, "hips");
        }
    }

    #[test]
    fn test_full_mapping_is_valid() {
        assert_eq!(HumanoidSchema::vrm0().validate(&full_mapping()), vec![]);
    }

    #[test]
    fn test_required_only_mapping_is_valid() {
        let mapping: NameMapping = REQUIRED_BONES.iter().map(|b| (*b, *b)).collect();
        assert_eq!(HumanoidSchema::vrm0().validate(&mapping), vec![]);
    }

    #[test]
    fn test_missing_required_reported_alone() {
        let mapping = full_mapping().without("leftFoot");
        assert_eq!(
            HumanoidSchema::vrm0().validate(&mapping),
            vec![SchemaViolation::MissingRequired {
                bone: "leftFoot".to_string()
            }]
        );
    }

    #[test]
    fn test_unknown_key_reported_alone() {
        let mapping = full_mapping().with("tail", "Tail_01");
        let violations = HumanoidSchema::vrm0().validate(&mapping);
        assert_eq!(
            violations,
            vec![SchemaViolation::Unrecognized {
                bone: "tail".to_string(),
                rig_bone: "Tail_01".to_string()
            }]
        );
        assert_eq!(violations[0].code(), ErrorCode::UnknownSchemaBone);
    }

    #[test]
    fn test_missing_hips_splits_tree() {
        let mapping = full_mapping().without("hips");
        let violations = HumanoidSchema::vrm0().validate(&mapping);
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0],
            SchemaViolation::MissingRequired {
                bone: "hips".to_string()
            }
        );
        match &violations[1] {
            SchemaViolation::MultipleRoots { roots } => {
                assert_eq!(roots, &vec!["leftUpperLeg", "rightUpperLeg", "spine"]);
            }
            other => panic!("unexpected violation {:?}", other),
        }
    }

    #[test]
    fn test_empty_mapping_reports_each_required_bone() {
        let violations = HumanoidSchema::vrm0().validate(&NameMapping::default());
        assert_eq!(violations.len(), REQUIRED_BONES.len());
        assert!(violations
            .iter()
            .all(|v| v.code() == ErrorCode::MissingRequiredBone));
    }

    static LOOP_REQUIRED: &[&str] = &["root", "a"];
    static LOOP_OPTIONAL: &[&str] = &["b", "c"];
    static LOOP_HIERARCHY: &[(&str, &str)] = &[("a", "root"), ("b", "c"), ("c", "b")];

    #[test]
    fn test_cycle_through_mapped_bones() {
        let schema = HumanoidSchema::from_tables(LOOP_REQUIRED, LOOP_OPTIONAL, LOOP_HIERARCHY);
        let mapping: NameMapping = [("root", "R"), ("a", "A"), ("b", "B"), ("c", "C")]
            .into_iter()
            .collect();
        assert_eq!(
            schema.validate(&mapping),
            vec![SchemaViolation::Cycle {
                bones: vec!["b".to_string(), "c".to_string()]
            }]
        );
    }

    #[test]
    fn test_cycle_through_unmapped_bones() {
        let schema = HumanoidSchema::from_tables(LOOP_REQUIRED, LOOP_OPTIONAL, LOOP_HIERARCHY);
        let mapping: NameMapping = [("root", "R"), ("a", "A"), ("c", "C")].into_iter().collect();
        assert_eq!(
            schema.validate(&mapping),
            vec![SchemaViolation::Cycle {
                bones: vec!["b".to_string(), "c".to_string()]
            }]
        );
    }

    #[test]
    fn test_violation_display() {
        let v = SchemaViolation::MissingRequired {
            bone: "neck".to_string(),
        };
        assert_eq!(v.to_string(), "required humanoid bone 'neck' is not mapped");
        let err = v.to_validation_error();
        assert_eq!(err.path.as_deref(), Some("neck"));
        assert_eq!(err.code.code(), "E030");
    }
}
