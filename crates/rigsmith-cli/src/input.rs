//! Loading parameter sets and mappings from JSON files.
//!
//! Every loader returns the parsed value together with a BLAKE3 hash of the
//! raw file content, so reports can name exactly which input they came from.

use std::path::{Path, PathBuf};

use rigsmith_spec::{NameMapping, ParameterSet};

/// Where a parameter set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsSource {
    /// No file given; every slider at its default.
    Defaults,
    /// Parsed from a JSON file.
    File(PathBuf),
}

impl ParamsSource {
    pub fn describe(&self) -> String {
        match self {
            ParamsSource::Defaults => "defaults".to_string(),
            ParamsSource::File(path) => path.display().to_string(),
        }
    }
}

/// A loaded parameter set.
#[derive(Debug)]
pub struct LoadedParams {
    pub params: ParameterSet,
    pub source: ParamsSource,
    /// BLAKE3 hash of the file content, or of `{}` for defaults.
    pub source_hash: String,
}

/// A loaded humanoid mapping.
#[derive(Debug)]
pub struct LoadedMapping {
    pub mapping: NameMapping,
    pub source_hash: String,
}

/// Errors that can occur while loading input files.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { path: PathBuf, message: String },
}

impl InputError {
    /// Stable CLI error code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::FileRead { .. } => crate::commands::json_output::error_codes::FILE_READ,
            InputError::JsonParse { .. } => crate::commands::json_output::error_codes::JSON_PARSE,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            InputError::FileRead { path, .. } | InputError::JsonParse { path, .. } => path,
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "JSON parse error in '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn hash_source(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Loads a parameter set, or the defaults when `path` is `None`.
///
/// Missing fields take their defaults; unknown fields are rejected.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use rigsmith_cli::input::load_params;
///
/// let loaded = load_params(Some(Path::new("params.json"))).unwrap();
/// println!("height = {}", loaded.params.height);
/// ```
pub fn load_params(path: Option<&Path>) -> Result<LoadedParams, InputError> {
    let Some(path) = path else {
        return Ok(LoadedParams {
            params: ParameterSet::default(),
            source: ParamsSource::Defaults,
            source_hash: hash_source("{}"),
        });
    };

    let content = read(path)?;
    let params = ParameterSet::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(LoadedParams {
        params,
        source: ParamsSource::File(path.to_path_buf()),
        source_hash: hash_source(&content),
    })
}

/// Loads a `{ humanoid bone: rig bone }` JSON object.
pub fn load_mapping(path: &Path) -> Result<LoadedMapping, InputError> {
    let content = read(path)?;
    let mapping = NameMapping::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(LoadedMapping {
        mapping,
        source_hash: hash_source(&content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_path() {
        let loaded = load_params(None).unwrap();
        assert_eq!(loaded.params, ParameterSet::default());
        assert_eq!(loaded.source, ParamsSource::Defaults);
        assert_eq!(loaded.source_hash.len(), 64);
    }

    #[test]
    fn test_partial_params_file() {
        let file = write_temp(r#"{"height": 1.5, "nail_bone": true}"#);
        let loaded = load_params(Some(file.path())).unwrap();
        assert_eq!(loaded.params.height, 1.5);
        assert!(loaded.params.nail_bone);
        assert_eq!(loaded.params.head_ratio, 8.0);
        assert!(matches!(loaded.source, ParamsSource::File(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_temp(r#"{"tallness": 1.5}"#);
        let err = load_params(Some(file.path())).unwrap_err();
        assert_eq!(err.code(), "CLI_003");
        assert!(err.to_string().contains("tallness"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_mapping(Path::new("/nonexistent/mapping.json")).unwrap_err();
        assert_eq!(err.code(), "CLI_001");
        assert_eq!(err.path(), Path::new("/nonexistent/mapping.json"));
    }

    #[test]
    fn test_load_mapping() {
        let file = write_temp(r#"{"hips": "Hips", "spine": "Spine"}"#);
        let loaded = load_mapping(file.path()).unwrap();
        assert_eq!(loaded.mapping.get("spine"), Some("Spine"));
    }
}
