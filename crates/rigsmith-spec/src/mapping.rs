//! Humanoid bone name to rig bone name table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps humanoid schema bone names (e.g. `leftUpperArm`) to the rig bone that
/// fulfills them (e.g. `Arm_L`).
///
/// A mapping is built once and never edited in place; derived mappings are
/// new values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameMapping(BTreeMap<String, String>);

impl NameMapping {
    /// Returns the rig bone mapped to a schema bone.
    pub fn get(&self, schema_bone: &str) -> Option<&str> {
        self.0.get(schema_bone).map(String::as_str)
    }

    /// Returns true if the schema bone has an entry.
    pub fn contains(&self, schema_bone: &str) -> bool {
        self.0.contains_key(schema_bone)
    }

    /// Iterates `(schema_bone, rig_bone)` pairs in schema-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates mapped schema bone names.
    pub fn schema_bones(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy without the given schema bone.
    pub fn without(&self, schema_bone: &str) -> Self {
        let mut map = self.0.clone();
        map.remove(schema_bone);
        Self(map)
    }

    /// Returns a copy with one entry added or replaced.
    pub fn with(&self, schema_bone: impl Into<String>, rig_bone: impl Into<String>) -> Self {
        let mut map = self.0.clone();
        map.insert(schema_bone.into(), rig_bone.into());
        Self(map)
    }

    /// Parses a mapping from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_serde_is_flat_object() {
        let mapping: NameMapping = [("hips", "Hips"), ("leftHand", "hand_L")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"hips":"Hips","leftHand":"hand_L"}"#);

        let parsed = NameMapping::from_json(&json).unwrap();
        assert_eq!(parsed, mapping);
    }

    #[test]
    fn test_derived_mappings_leave_original_untouched() {
        let mapping: NameMapping = [("hips", "Hips"), ("spine", "Spine")].into_iter().collect();
        let smaller = mapping.without("spine");
        let larger = mapping.with("chest", "Chest");

        assert_eq!(mapping.len(), 2);
        assert_eq!(smaller.len(), 1);
        assert!(!smaller.contains("spine"));
        assert_eq!(larger.get("chest"), Some("Chest"));
    }
}
