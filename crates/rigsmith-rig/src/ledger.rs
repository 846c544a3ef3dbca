//! Record of which rig bone fulfills which humanoid bone.
//!
//! The synthesizer appends one entry per mapped bone while it builds the
//! rig. The ledger only stores names; [`crate::mapper::map_to_schema`]
//! resolves them against the finished rig.

use crate::builder::Side;
use crate::fingers::{segment_base_name, Finger, Segment};

/// One `(humanoid bone, rig bone)` association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub schema_bone: String,
    pub rig_bone: String,
}

/// Append-only list of associations, in construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisLedger {
    entries: Vec<LedgerEntry>,
}

impl SynthesisLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a center bone, e.g. `("spine", "Spine")`.
    pub fn record(&mut self, schema_bone: impl Into<String>, rig_bone: impl Into<String>) {
        self.entries.push(LedgerEntry {
            schema_bone: schema_bone.into(),
            rig_bone: rig_bone.into(),
        });
    }

    /// Records both sides of a mirrored part.
    ///
    /// `("UpperArm", "Arm")` yields `leftUpperArm -> Arm_L` and
    /// `rightUpperArm -> Arm_R`.
    pub fn record_pair(&mut self, part: &str, rig_base: &str) {
        for side in Side::BOTH {
            self.record(
                format!("{}{}", side.schema_prefix(), part),
                side.bone_name(rig_base),
            );
        }
    }

    /// Records both sides of one finger segment.
    pub fn record_finger(&mut self, finger: Finger, segment: Segment) {
        for side in Side::BOTH {
            self.record(
                format!(
                    "{}{}{}",
                    side.schema_prefix(),
                    finger.schema_name(),
                    segment.schema_name()
                ),
                side.bone_name(&segment_base_name(finger, segment.rig_name())),
            );
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
