//! Constant extension payloads attached to every generated armature.
//!
//! None of these values are computed from the sliders. They are built once
//! per process and shared read-only. Field names follow the VRM 0.x JSON
//! keys, including the format's own spellings (`stiffiness`,
//! `violentUssageName`).

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Model metadata placeholder written for the free-text meta fields.
pub const META_PLACEHOLDER: &str = "undefined";

/// Blend shape presets as `(name, presetName)`.
pub static BLEND_SHAPE_PRESETS: &[(&str, &str)] = &[
    ("Neutral", "neutral"),
    ("A", "a"),
    ("I", "i"),
    ("U", "u"),
    ("E", "e"),
    ("O", "o"),
    ("Blink", "blink"),
    ("Joy", "joy"),
    ("Angry", "angry"),
    ("Sorrow", "sorrow"),
    ("Fun", "fun"),
    ("LookUp", "lookup"),
    ("LookDown", "lookdown"),
    ("LookLeft", "lookleft"),
    ("LookRight", "lookright"),
    ("Blink_L", "blink_l"),
    ("Blink_R", "blink_r"),
];

/// A `{x, y, z}` vector in payload JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3Value {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3Value {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Humanoid muscle tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanoidParams {
    pub arm_stretch: f64,
    pub leg_stretch: f64,
    pub upper_arm_twist: f64,
    pub lower_arm_twist: f64,
    pub upper_leg_twist: f64,
    pub lower_leg_twist: f64,
    pub feet_spacing: f64,
    #[serde(rename = "hasTranslationDoF")]
    pub has_translation_dof: bool,
}

impl Default for HumanoidParams {
    fn default() -> Self {
        Self {
            arm_stretch: 0.05,
            leg_stretch: 0.05,
            upper_arm_twist: 0.5,
            lower_arm_twist: 0.5,
            upper_leg_twist: 0.5,
            lower_leg_twist: 0.5,
            feet_spacing: 0.0,
            has_translation_dof: false,
        }
    }
}

/// Look-at response curve for one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookAtCurve {
    /// Two cubic keys: `[time, value, in_tangent, out_tangent]` each.
    pub curve: [f64; 8],
    pub x_range: f64,
    pub y_range: f64,
}

impl LookAtCurve {
    fn linear(y_range: f64) -> Self {
        Self {
            curve: [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            x_range: 90.0,
            y_range,
        }
    }
}

/// Mesh visibility annotation for first-person rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshAnnotation {
    pub mesh: i32,
    pub first_person_flag: String,
}

/// First-person camera and look-at configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstPersonParams {
    pub first_person_bone: String,
    pub first_person_bone_offset: Vec3Value,
    pub mesh_annotations: Vec<MeshAnnotation>,
    pub look_at_type_name: String,
    pub look_at_horizontal_inner: LookAtCurve,
    pub look_at_horizontal_outer: LookAtCurve,
    pub look_at_vertical_down: LookAtCurve,
    pub look_at_vertical_up: LookAtCurve,
}

impl Default for FirstPersonParams {
    fn default() -> Self {
        Self {
            first_person_bone: "Head".to_string(),
            first_person_bone_offset: Vec3Value::new(0.0, 0.0, 0.0),
            mesh_annotations: Vec::new(),
            look_at_type_name: "Bone".to_string(),
            look_at_horizontal_inner: LookAtCurve::linear(8.0),
            look_at_horizontal_outer: LookAtCurve::linear(12.0),
            look_at_vertical_down: LookAtCurve::linear(10.0),
            look_at_vertical_up: LookAtCurve::linear(10.0),
        }
    }
}

/// Morph target weight driven by a blend shape group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendShapeBind {
    pub mesh: i32,
    pub index: i32,
    pub weight: f64,
}

/// Material property driven by a blend shape group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialValueBind {
    pub material_name: String,
    pub property_name: String,
    pub target_value: Vec<f64>,
}

/// One blend shape preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendShapeGroup {
    pub name: String,
    pub preset_name: String,
    pub binds: Vec<BlendShapeBind>,
    pub material_values: Vec<MaterialValueBind>,
    pub is_binary: bool,
}

impl BlendShapeGroup {
    /// An empty, non-binary preset.
    pub fn preset(name: &str, preset_name: &str) -> Self {
        Self {
            name: name.to_string(),
            preset_name: preset_name.to_string(),
            binds: Vec::new(),
            material_values: Vec::new(),
            is_binary: false,
        }
    }
}

/// One spring bone physics group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringBoneGroup {
    pub comment: String,
    #[serde(rename = "stiffiness")]
    pub stiffness: f64,
    pub gravity_power: f64,
    pub gravity_dir: Vec3Value,
    pub drag_force: f64,
    /// Center node index, -1 for none.
    pub center: i32,
    pub hit_radius: f64,
    pub bones: Vec<u32>,
    pub collider_groups: Vec<u32>,
}

impl Default for SpringBoneGroup {
    fn default() -> Self {
        Self {
            comment: String::new(),
            stiffness: 1.0,
            gravity_power: 0.0,
            gravity_dir: Vec3Value::new(0.0, -1.0, 0.0),
            drag_force: 0.4,
            center: -1,
            hit_radius: 0.02,
            bones: Vec::new(),
            collider_groups: Vec::new(),
        }
    }
}

/// Model metadata and usage permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VrmMeta {
    pub version: String,
    pub author: String,
    pub contact_information: String,
    pub reference: String,
    pub title: String,
    pub other_permission_url: String,
    pub other_license_url: String,
    pub allowed_user_name: String,
    #[serde(rename = "violentUssageName")]
    pub violent_usage_name: String,
    #[serde(rename = "sexualUssageName")]
    pub sexual_usage_name: String,
    #[serde(rename = "commercialUssageName")]
    pub commercial_usage_name: String,
    pub license_name: String,
}

impl Default for VrmMeta {
    fn default() -> Self {
        let placeholder = || META_PLACEHOLDER.to_string();
        Self {
            version: placeholder(),
            author: placeholder(),
            contact_information: placeholder(),
            reference: placeholder(),
            title: placeholder(),
            other_permission_url: placeholder(),
            other_license_url: placeholder(),
            allowed_user_name: "OnlyAuthor".to_string(),
            violent_usage_name: "Disallow".to_string(),
            sexual_usage_name: "Disallow".to_string(),
            commercial_usage_name: "Disallow".to_string(),
            license_name: "Redistribution_Prohibited".to_string(),
        }
    }
}

/// Every constant payload emitted next to a generated armature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDefaults {
    pub meta: VrmMeta,
    pub humanoid_params: HumanoidParams,
    pub first_person_params: FirstPersonParams,
    pub blend_shape_groups: Vec<BlendShapeGroup>,
    pub spring_bones: Vec<SpringBoneGroup>,
}

impl Default for ExtensionDefaults {
    fn default() -> Self {
        Self {
            meta: VrmMeta::default(),
            humanoid_params: HumanoidParams::default(),
            first_person_params: FirstPersonParams::default(),
            blend_shape_groups: BLEND_SHAPE_PRESETS
                .iter()
                .map(|(name, preset)| BlendShapeGroup::preset(name, preset))
                .collect(),
            spring_bones: vec![SpringBoneGroup::default()],
        }
    }
}

static EXTENSION_DEFAULTS: OnceLock<ExtensionDefaults> = OnceLock::new();

/// Returns the process-wide default payloads.
pub fn extension_defaults() -> &'static ExtensionDefaults {
    EXTENSION_DEFAULTS.get_or_init(ExtensionDefaults::default)
}
