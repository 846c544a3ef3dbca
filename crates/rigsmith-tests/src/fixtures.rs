//! Shared fixtures for the integration tests.

use std::path::PathBuf;

use rigsmith_rig::{synthesize, Armature};
use rigsmith_spec::{NameMapping, ParameterSet};
use tempfile::TempDir;

/// Armature built from default sliders.
pub fn default_armature() -> Armature {
    match synthesize(&ParameterSet::default()) {
        Ok(armature) => armature,
        Err(e) => panic!("default sliders failed to synthesize: {e}"),
    }
}

/// Mapping of the default armature.
pub fn default_mapping() -> NameMapping {
    default_armature().mapping().clone()
}

/// A child-friendly set of sliders with nail bones.
pub fn chibi_params() -> ParameterSet {
    ParameterSet {
        height: 1.1,
        head_ratio: 4.5,
        aging_ratio: 0.1,
        hand_ratio: 1.3,
        finger_1_2_ratio: 0.9,
        finger_2_3_ratio: 0.6,
        nail_bone: true,
        ..Default::default()
    }
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Err(e) = std::fs::write(&path, content) {
        panic!("failed to write fixture {}: {e}", path.display());
    }
    path
}
