//! Flat bone records for export.

use serde::{Deserialize, Serialize};

/// One bone of a generated armature, flattened for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkeletonBone {
    /// Unique bone name.
    pub bone: String,
    /// Bone head position [X, Y, Z].
    pub head: [f64; 3],
    /// Bone tail position [X, Y, Z].
    pub tail: [f64; 3],
    /// Parent bone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Bone roll in degrees (rotation around the bone's own axis).
    /// Sets which way the bone's local X/Z axes face, and so its bend direction.
    pub roll: f64,
    /// Envelope radius at head and tail.
    pub radius: f64,
}

impl SkeletonBone {
    /// Distance from head to tail.
    pub fn length(&self) -> f64 {
        let d = [
            self.tail[0] - self.head[0],
            self.tail[1] - self.head[1],
            self.tail[2] - self.head[2],
        ];
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_bone_serde() {
        let bone = SkeletonBone {
            bone: "Spine".to_string(),
            head: [0.0, 0.0, 1.0],
            tail: [0.0, 0.0, 1.25],
            parent: Some("Hips".to_string()),
            roll: -90.0,
            radius: 0.1,
        };

        let json = serde_json::to_string(&bone).unwrap();
        assert!(json.contains("\"parent\":\"Hips\""));

        let parsed: SkeletonBone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bone);
        assert!((parsed.length() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_root_bone_omits_parent() {
        let bone = SkeletonBone {
            bone: "root".to_string(),
            head: [0.0; 3],
            tail: [0.0, 0.0, 0.3],
            parent: None,
            roll: 0.0,
            radius: 0.1,
        };
        let json = serde_json::to_string(&bone).unwrap();
        assert!(!json.contains("parent"));
    }
}
