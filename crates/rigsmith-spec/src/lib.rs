//! rigsmith Canonical Types Library
//!
//! This crate provides the data side of humanoid armature synthesis: the
//! slider parameter set and its declared ranges, the VRM 0.x humanoid bone
//! schema, the schema-name to rig-name mapping table, the constant extension
//! payloads that ship next to every generated rig, and the validation and
//! hashing helpers shared by the backend and CLI.
//!
//! # Example
//!
//! ```
//! use rigsmith_spec::{ParameterSet, HumanoidSchema};
//! use rigsmith_spec::validation::validate_params;
//!
//! let params = ParameterSet::default();
//! assert!(validate_params(&params).is_ok());
//!
//! let schema = HumanoidSchema::vrm0();
//! assert!(schema.is_required("hips"));
//! assert_eq!(schema.parent_of("leftHand"), Some("leftLowerArm"));
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error codes and validation result types
//! - [`params`]: Slider parameter set and range table
//! - [`schema`]: Humanoid bone vocabulary, hierarchy, and mapping validation
//! - [`mapping`]: Schema-name to rig-name table
//! - [`skeleton`]: Flat bone records for export
//! - [`extensions`]: Constant default payloads (meta, humanoid tuning, first
//!   person, blend shapes, spring bones)
//! - [`document`]: The serialized armature document
//! - [`validation`]: Parameter validation
//! - [`hash`]: Canonical hashing

pub mod document;
pub mod error;
pub mod extensions;
pub mod hash;
pub mod mapping;
pub mod params;
pub mod schema;
pub mod skeleton;
pub mod validation;

pub use document::{ArmatureDocument, DOCUMENT_VERSION};
pub use error::{ErrorCode, SpecError, ValidationError, ValidationResult};
pub use extensions::{
    extension_defaults, BlendShapeGroup, ExtensionDefaults, FirstPersonParams, HumanoidParams,
    LookAtCurve, SpringBoneGroup, Vec3Value, VrmMeta,
};
pub use hash::{canonical_params_hash, canonical_value_hash};
pub use mapping::NameMapping;
pub use params::{ParamRange, ParameterSet, PARAMETER_RANGES};
pub use schema::{HumanoidSchema, SchemaViolation};
pub use skeleton::SkeletonBone;
