//! The serialized armature document written by `rigsmith generate`.

use serde::{Deserialize, Serialize};

use crate::extensions::ExtensionDefaults;
use crate::mapping::NameMapping;
use crate::params::ParameterSet;
use crate::skeleton::SkeletonBone;

/// Current armature document version.
pub const DOCUMENT_VERSION: u32 = 1;

/// A generated armature with its humanoid mapping and default payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmatureDocument {
    /// Document format version.
    pub document_version: u32,
    /// Canonical BLAKE3 hash of `params`.
    pub params_hash: String,
    /// Sliders the armature was built from.
    pub params: ParameterSet,
    /// Name of the root bone.
    pub root: String,
    /// Bones in creation order; parents always precede children.
    pub bones: Vec<SkeletonBone>,
    /// Humanoid bone name to rig bone name.
    pub humanoid_bones: NameMapping,
    /// Constant payloads for the exporter.
    pub extensions: ExtensionDefaults,
}

impl ArmatureDocument {
    /// Looks up a bone record by name.
    pub fn bone(&self, name: &str) -> Option<&SkeletonBone> {
        self.bones.iter().find(|b| b.bone == name)
    }

    /// Serializes the document to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
