//! Finger chain synthesis.
//!
//! Each finger is three mirrored segment pairs (plus an optional nail)
//! running along +X from a root placed on the hand. Segment lengths split
//! the finger's total length by the two phalanx ratios.

use crate::builder::{BoneKind, BonePair, RigBuilder};
use crate::error::RigResult;
use crate::math::{self, Vec3};

/// Divisor used to derive the shorter finger lengths from the middle finger.
const SHORT_FINGER_DIVISOR: f64 = 2.3125;

/// Thumb splay around the vertical axis, in degrees, for the left side.
const THUMB_SPLAY_DEGREES: f64 = -45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];

    /// Name fragment used in rig bone names.
    pub fn rig_name(self) -> &'static str {
        match self {
            Finger::Thumb => "thumbs",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Little => "little",
        }
    }

    /// Name fragment used in humanoid bone names.
    pub fn schema_name(self) -> &'static str {
        match self {
            Finger::Thumb => "Thumb",
            Finger::Index => "Index",
            Finger::Middle => "Middle",
            Finger::Ring => "Ring",
            Finger::Little => "Little",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Proximal,
    Intermediate,
    Distal,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Proximal, Segment::Intermediate, Segment::Distal];

    pub fn rig_name(self) -> &'static str {
        match self {
            Segment::Proximal => "proximal",
            Segment::Intermediate => "intermediate",
            Segment::Distal => "distal",
        }
    }

    pub fn schema_name(self) -> &'static str {
        match self {
            Segment::Proximal => "Proximal",
            Segment::Intermediate => "Intermediate",
            Segment::Distal => "Distal",
        }
    }
}

/// Base name of a finger segment pair, e.g. `finger_index_distal`.
pub fn segment_base_name(finger: Finger, segment: &str) -> String {
    format!("finger_{}_{}", finger.rig_name(), segment)
}

/// Segment lengths of one finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerSegments {
    pub proximal: f64,
    pub intermediate: f64,
    pub distal: f64,
}

impl FingerSegments {
    /// Splits `total` so that `intermediate = proximal * r1` and
    /// `distal = intermediate * r2`.
    pub fn from_ratios(total: f64, r1: f64, r2: f64) -> Self {
        let k = 1.0 / (r1 * r2 + r1 + 1.0);
        Self {
            proximal: total * k,
            intermediate: total * k * r1,
            distal: total * k * r1 * r2,
        }
    }

    pub fn total(&self) -> f64 {
        self.proximal + self.intermediate + self.distal
    }

    pub fn get(&self, segment: Segment) -> f64 {
        match segment {
            Segment::Proximal => self.proximal,
            Segment::Intermediate => self.intermediate,
            Segment::Distal => self.distal,
        }
    }
}

/// Bone pairs of one synthesized finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerChain {
    pub finger: Finger,
    pub proximal: BonePair,
    pub intermediate: BonePair,
    pub distal: BonePair,
    pub nail: Option<BonePair>,
}

impl FingerChain {
    pub fn segment(&self, segment: Segment) -> BonePair {
        match segment {
            Segment::Proximal => self.proximal,
            Segment::Intermediate => self.intermediate,
            Segment::Distal => self.distal,
        }
    }

    /// Every pair in the chain from root to tip.
    pub fn pairs(&self) -> impl Iterator<Item = BonePair> + '_ {
        [self.proximal, self.intermediate, self.distal]
            .into_iter()
            .chain(self.nail)
    }
}

/// Where a finger root is placed along the hand, in offset units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerLayout {
    /// True for the hand bone's head, false for its tail.
    pub at_hand_head: bool,
    /// Multiple of the lateral offset unit added to the anchor's Y.
    pub offset_units: f64,
    pub length: f64,
}

impl FingerLayout {
    /// Layout of a finger on a hand of the given size.
    pub fn for_finger(finger: Finger, hand_size: f64) -> Self {
        let half = hand_size / 2.0;
        let short = half - (1.0 / SHORT_FINGER_DIVISOR) * half / 3.0;
        let (at_hand_head, offset_units, length) = match finger {
            Finger::Thumb => (true, 3.0, half),
            Finger::Index => (false, 3.0, short),
            Finger::Middle => (false, 1.0, half),
            Finger::Ring => (false, -1.0, short),
            Finger::Little => (
                false,
                -3.0,
                short * ((1.0 / SHORT_FINGER_DIVISOR) + (1.0 / SHORT_FINGER_DIVISOR) * 0.75),
            ),
        };
        Self {
            at_hand_head,
            offset_units,
            length,
        }
    }
}

/// Builds finger chains for one pair of hands.
#[derive(Debug, Clone, Copy)]
pub struct FingerChainSynthesizer {
    hands: BonePair,
    hand_size: f64,
    finger_1_2_ratio: f64,
    finger_2_3_ratio: f64,
    nail_bone: bool,
}

impl FingerChainSynthesizer {
    pub fn new(
        hands: BonePair,
        hand_size: f64,
        finger_1_2_ratio: f64,
        finger_2_3_ratio: f64,
        nail_bone: bool,
    ) -> Self {
        Self {
            hands,
            hand_size,
            finger_1_2_ratio,
            finger_2_3_ratio,
            nail_bone,
        }
    }

    fn segment_radius(&self) -> f64 {
        self.hand_size / 18.0
    }

    fn nail_radius(&self) -> f64 {
        self.hand_size / 20.0
    }

    /// Adds one finger rooted at `proximal_pos` (left side coordinates).
    pub fn build_finger(
        &self,
        builder: &mut RigBuilder,
        finger: Finger,
        proximal_pos: Vec3,
        total_length: f64,
    ) -> RigResult<FingerChain> {
        let lengths =
            FingerSegments::from_ratios(total_length, self.finger_1_2_ratio, self.finger_2_3_ratio);

        let mut parents = self.hands;
        let mut head = proximal_pos;
        let mut pairs = Vec::with_capacity(3);
        for segment in Segment::ALL {
            let tail = math::offset_x(head, lengths.get(segment));
            let pair = builder.add_mirrored_pair(
                &segment_base_name(finger, segment.rig_name()),
                head,
                tail,
                parents,
                self.segment_radius(),
                BoneKind::Arm,
            )?;
            pairs.push(pair);
            parents = pair;
            head = tail;
        }

        let nail = if self.nail_bone {
            Some(builder.add_mirrored_pair(
                &segment_base_name(finger, "nail"),
                head,
                math::offset_x(head, lengths.distal),
                parents,
                self.nail_radius(),
                BoneKind::Arm,
            )?)
        } else {
            None
        };

        Ok(FingerChain {
            finger,
            proximal: pairs[0],
            intermediate: pairs[1],
            distal: pairs[2],
            nail,
        })
    }

    /// Turns the thumb toward the palm around each side's proximal head.
    ///
    /// Left turns by -45 degrees and right by +45 so the pair stays mirrored.
    /// Rolls are then set to 0 (left) and 180 (right).
    pub fn splay_thumb(&self, builder: &mut RigBuilder, chain: &FingerChain) -> RigResult<()> {
        let left_pivot = builder.require(chain.proximal.left)?.head;
        let right_pivot = builder.require(chain.proximal.right)?.head;

        // The nail keeps its unrotated placement.
        for pair in [chain.proximal, chain.intermediate, chain.distal] {
            builder.rotate_about_z(pair.left, left_pivot, THUMB_SPLAY_DEGREES)?;
            builder.set_roll(pair.left, 0.0)?;
            builder.rotate_about_z(pair.right, right_pivot, -THUMB_SPLAY_DEGREES)?;
            builder.set_roll(pair.right, 180.0)?;
        }
        Ok(())
    }

    /// Adds all five fingers to the hands, splaying the thumb.
    ///
    /// `hand_head` and `hand_tail` are the left hand's endpoints.
    pub fn build_hand(
        &self,
        builder: &mut RigBuilder,
        hand_head: Vec3,
        hand_tail: Vec3,
    ) -> RigResult<Vec<FingerChain>> {
        let unit = -self.hand_size / 16.0;
        let mut chains = Vec::with_capacity(Finger::ALL.len());
        for finger in Finger::ALL {
            let layout = FingerLayout::for_finger(finger, self.hand_size);
            let anchor = if layout.at_hand_head {
                hand_head
            } else {
                hand_tail
            };
            let root = math::offset_y(anchor, unit * layout.offset_units);
            let chain = self.build_finger(builder, finger, root, layout.length)?;
            if finger == Finger::Thumb {
                self.splay_thumb(builder, &chain)?;
            }
            chains.push(chain);
        }
        Ok(chains)
    }
}
