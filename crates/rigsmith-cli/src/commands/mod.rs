//! CLI command implementations

pub mod generate;
pub mod json_output;
pub mod params;
pub mod validate;
pub mod weights;

/// Serializes a JSON envelope for stdout.
pub(crate) fn to_json_string<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    use anyhow::Context;
    serde_json::to_string_pretty(value).context("Failed to serialize JSON output")
}
