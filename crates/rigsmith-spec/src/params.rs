//! Slider parameters for armature synthesis.
//!
//! Lengths are in meters. Every scalar slider has a declared default and an
//! inclusive minimum; bounded sliders also carry an inclusive maximum. The
//! range table is the single source for defaults, validation, and the CLI's
//! parameter listing.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Declared range of one scalar slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Field name as it appears in JSON.
    pub name: &'static str,
    /// Default value.
    pub default: f64,
    /// Inclusive minimum.
    pub min: f64,
    /// Inclusive maximum, if the slider is bounded above.
    pub max: Option<f64>,
    /// Short description.
    pub description: &'static str,
}

impl ParamRange {
    /// Returns true if `value` lies within the declared bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// Total height (top of head).
pub const HEIGHT: ParamRange = ParamRange {
    name: "height",
    default: 1.70,
    min: 0.3,
    max: None,
    description: "total height in meters",
};

/// Heads per body height.
pub const HEAD_RATIO: ParamRange = ParamRange {
    name: "head_ratio",
    default: 8.0,
    min: 4.0,
    max: None,
    description: "height per heads",
};

/// Head width relative to head size.
pub const HEAD_WIDTH_RATIO: ParamRange = ParamRange {
    name: "head_width_ratio",
    default: 2.0 / 3.0,
    min: 0.3,
    max: Some(1.2),
    description: "head width per head height",
};

/// Leg/torso balance between child-like (0) and adult (1) builds.
pub const AGING_RATIO: ParamRange = ParamRange {
    name: "aging_ratio",
    default: 0.5,
    min: 0.0,
    max: Some(1.0),
    description: "child (0) to adult (1) leg/torso balance, effective at low head ratios",
};

/// Eye bone depth along -y.
pub const EYE_DEPTH: ParamRange = ParamRange {
    name: "eye_depth",
    default: -0.03,
    min: -0.1,
    max: Some(0.0),
    description: "eye bone depth",
};

/// Inner shoulder position.
pub const SHOULDER_IN_WIDTH: ParamRange = ParamRange {
    name: "shoulder_in_width",
    default: 0.05,
    min: 0.01,
    max: None,
    description: "inner shoulder position",
};

/// Shoulder bone span.
pub const SHOULDER_WIDTH: ParamRange = ParamRange {
    name: "shoulder_width",
    default: 0.08,
    min: 0.01,
    max: None,
    description: "shoulder roll position",
};

/// Arm length multiplier.
pub const ARM_LENGTH_RATIO: ParamRange = ParamRange {
    name: "arm_length_ratio",
    default: 1.0,
    min: 0.5,
    max: None,
    description: "arm length multiplier",
};

/// Hand size multiplier.
pub const HAND_RATIO: ParamRange = ParamRange {
    name: "hand_ratio",
    default: 1.0,
    min: 0.5,
    max: Some(2.0),
    description: "hand size multiplier",
};

/// Intermediate length over proximal length.
pub const FINGER_1_2_RATIO: ParamRange = ParamRange {
    name: "finger_1_2_ratio",
    default: 0.75,
    min: 0.5,
    max: Some(1.0),
    description: "proximal / intermediate",
};

/// Distal length over intermediate length.
pub const FINGER_2_3_RATIO: ParamRange = ParamRange {
    name: "finger_2_3_ratio",
    default: 0.75,
    min: 0.5,
    max: Some(1.0),
    description: "intermediate / distal",
};

/// Lower body share of the height at eight heads tall.
pub const LEG_LENGTH_RATIO: ParamRange = ParamRange {
    name: "leg_length_ratio",
    default: 0.5,
    min: 0.3,
    max: Some(0.6),
    description: "upper body / lower body",
};

/// Lateral leg spacing multiplier.
pub const LEG_WIDTH_RATIO: ParamRange = ParamRange {
    name: "leg_width_ratio",
    default: 1.0,
    min: 0.01,
    max: None,
    description: "leg spacing multiplier",
};

/// Foot length.
pub const LEG_SIZE: ParamRange = ParamRange {
    name: "leg_size",
    default: 0.26,
    min: 0.05,
    max: None,
    description: "foot length in meters",
};

/// All scalar slider ranges in declaration order.
pub static PARAMETER_RANGES: &[ParamRange] = &[
    HEIGHT,
    HEAD_RATIO,
    HEAD_WIDTH_RATIO,
    AGING_RATIO,
    EYE_DEPTH,
    SHOULDER_IN_WIDTH,
    SHOULDER_WIDTH,
    ARM_LENGTH_RATIO,
    HAND_RATIO,
    FINGER_1_2_RATIO,
    FINGER_2_3_RATIO,
    LEG_LENGTH_RATIO,
    LEG_WIDTH_RATIO,
    LEG_SIZE,
];

/// Slider values driving one synthesis run.
///
/// Missing JSON fields fall back to their defaults; unknown fields are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterSet {
    /// Total height in meters.
    pub height: f64,
    /// Heads per body height.
    pub head_ratio: f64,
    /// Head width per head height.
    pub head_width_ratio: f64,
    /// Child (0) to adult (1) leg/torso balance.
    pub aging_ratio: f64,
    /// Eye bone depth (non-positive).
    pub eye_depth: f64,
    /// Inner shoulder position.
    pub shoulder_in_width: f64,
    /// Shoulder bone span.
    pub shoulder_width: f64,
    /// Arm length multiplier.
    pub arm_length_ratio: f64,
    /// Hand size multiplier.
    pub hand_ratio: f64,
    /// Intermediate over proximal finger segment length.
    pub finger_1_2_ratio: f64,
    /// Distal over intermediate finger segment length.
    pub finger_2_3_ratio: f64,
    /// Add a nail bone past each distal finger segment.
    pub nail_bone: bool,
    /// Lower body share at eight heads tall.
    pub leg_length_ratio: f64,
    /// Lateral leg spacing multiplier.
    pub leg_width_ratio: f64,
    /// Foot length in meters.
    pub leg_size: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            height: HEIGHT.default,
            head_ratio: HEAD_RATIO.default,
            head_width_ratio: HEAD_WIDTH_RATIO.default,
            aging_ratio: AGING_RATIO.default,
            eye_depth: EYE_DEPTH.default,
            shoulder_in_width: SHOULDER_IN_WIDTH.default,
            shoulder_width: SHOULDER_WIDTH.default,
            arm_length_ratio: ARM_LENGTH_RATIO.default,
            hand_ratio: HAND_RATIO.default,
            finger_1_2_ratio: FINGER_1_2_RATIO.default,
            finger_2_3_ratio: FINGER_2_3_RATIO.default,
            nail_bone: false,
            leg_length_ratio: LEG_LENGTH_RATIO.default,
            leg_width_ratio: LEG_WIDTH_RATIO.default,
            leg_size: LEG_SIZE.default,
        }
    }
}

impl ParameterSet {
    /// Parses a parameter set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the parameter set to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, SpecError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Returns each scalar slider paired with its declared range.
    pub fn scalars(&self) -> [(&'static ParamRange, f64); 14] {
        [
            (&PARAMETER_RANGES[0], self.height),
            (&PARAMETER_RANGES[1], self.head_ratio),
            (&PARAMETER_RANGES[2], self.head_width_ratio),
            (&PARAMETER_RANGES[3], self.aging_ratio),
            (&PARAMETER_RANGES[4], self.eye_depth),
            (&PARAMETER_RANGES[5], self.shoulder_in_width),
            (&PARAMETER_RANGES[6], self.shoulder_width),
            (&PARAMETER_RANGES[7], self.arm_length_ratio),
            (&PARAMETER_RANGES[8], self.hand_ratio),
            (&PARAMETER_RANGES[9], self.finger_1_2_ratio),
            (&PARAMETER_RANGES[10], self.finger_2_3_ratio),
            (&PARAMETER_RANGES[11], self.leg_length_ratio),
            (&PARAMETER_RANGES[12], self.leg_width_ratio),
            (&PARAMETER_RANGES[13], self.leg_size),
        ]
    }

    /// Looks up a scalar slider by its JSON name.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.scalars()
            .into_iter()
            .find(|(range, _)| range.name == name)
            .map(|(_, value)| value)
    }
}

/// Looks up a slider's declared range by name.
pub fn range_of(name: &str) -> Option<&'static ParamRange> {
    PARAMETER_RANGES.iter().find(|range| range.name == name)
}
