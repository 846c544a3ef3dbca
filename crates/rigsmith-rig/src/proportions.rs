//! Body proportions derived from the sliders.
//!
//! Every length the builder places bones with comes from here. The solver
//! never clamps; degenerate results are reported by [`Proportions::check`]
//! when the rig is finalized.

use rigsmith_spec::ParameterSet;
use serde::Serialize;

use crate::error::{RigError, RigResult};

/// Derived lengths and heights, in meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proportions {
    pub height: f64,
    pub head_size: f64,
    pub hand_size: f64,
    /// Upper body share of the total height.
    pub hip_up_down_ratio: f64,
    /// Crotch height.
    pub body_separate: f64,
    /// Height of the hips bone tail (sacrum).
    pub hips_height: f64,
    pub neck_length: f64,
    /// Spine plus chest.
    pub backbone_length: f64,
    pub chest_length: f64,
    pub spine_length: f64,
    /// Lateral offset of each leg from the center line.
    pub leg_width: f64,
    /// Upper leg and lower leg length.
    pub leg_bone_length: f64,
    pub arm_length: f64,
    pub forearm_length: f64,
    pub shoulder_in_pos: f64,
    /// Lateral spacing unit between finger roots.
    pub finger_y_offset: f64,
}

impl Proportions {
    /// Computes the proportions for a parameter set.
    ///
    /// # Example
    /// ```
    /// use rigsmith_rig::proportions::Proportions;
    /// use rigsmith_spec::ParameterSet;
    ///
    /// let p = Proportions::solve(&ParameterSet::default());
    /// assert!((p.head_size - 0.2125).abs() < 1e-12);
    /// ```
    pub fn solve(params: &ParameterSet) -> Self {
        let height = params.height;
        let head_ratio = params.head_ratio;
        let head_size = height / head_ratio;

        // Lower body share at eight heads, and at four heads blended by age.
        let eight_upside_ratio = 1.0 - params.leg_length_ratio;
        let four_upside_ratio = (2.5 / 4.0) * (1.0 - params.aging_ratio)
            + (1.0 - params.leg_length_ratio) * params.aging_ratio;
        let hip_up_down_ratio = eight_upside_ratio * (1.0 - (8.0 - head_ratio) / 4.0)
            + four_upside_ratio * (8.0 - head_ratio) / 4.0;

        let body_separate = height * (1.0 - hip_up_down_ratio);
        let neck_length = head_size * 2.0 / 3.0;
        let hips_height = body_separate + head_size * 3.0 / 4.0;
        // A third of the neck hides behind the jaw.
        let backbone_length = height - hips_height - head_size - neck_length / 2.0;
        let chest_length = backbone_length * 12.0 / 17.0;
        let spine_length = backbone_length * 5.0 / 17.0;

        let hand_size = head_size * 0.75 * params.hand_ratio;
        let leg_width = head_size / 4.0 * params.leg_width_ratio;
        let leg_bone_length = (body_separate + head_size * 3.0 / 8.0 - height * 0.05) / 2.0;

        let arm_length = head_size
            * (1.0 * (1.0 - (head_ratio - 6.0) / 2.0) + 1.5 * ((head_ratio - 6.0) / 2.0))
            * params.arm_length_ratio;
        // A clenched forearm plus fist is about as long as the upper arm.
        let forearm_length = f64::max(arm_length - hand_size / 2.0, arm_length * 0.8);

        Self {
            height,
            head_size,
            hand_size,
            hip_up_down_ratio,
            body_separate,
            hips_height,
            neck_length,
            backbone_length,
            chest_length,
            spine_length,
            leg_width,
            leg_bone_length,
            arm_length,
            forearm_length,
            shoulder_in_pos: params.shoulder_in_width / 2.0,
            finger_y_offset: -hand_size / 16.0,
        }
    }

    /// Named lengths that must be strictly positive for a usable rig.
    pub fn lengths(&self) -> [(&'static str, f64); 11] {
        [
            ("head_size", self.head_size),
            ("hand_size", self.hand_size),
            ("body_separate", self.body_separate),
            ("neck_length", self.neck_length),
            ("backbone_length", self.backbone_length),
            ("chest_length", self.chest_length),
            ("spine_length", self.spine_length),
            ("leg_width", self.leg_width),
            ("leg_bone_length", self.leg_bone_length),
            ("arm_length", self.arm_length),
            ("forearm_length", self.forearm_length),
        ]
    }

    /// Fails on the first length that is not a positive finite number.
    pub fn check(&self) -> RigResult<()> {
        match self
            .lengths()
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            Some((quantity, value)) => Err(RigError::geometry(quantity, value)),
            None => Ok(()),
        }
    }
}
