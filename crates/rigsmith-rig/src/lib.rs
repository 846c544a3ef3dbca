//! rigsmith armature synthesis backend.
//!
//! Builds a humanoid skeleton from a [`ParameterSet`](rigsmith_spec::ParameterSet)
//! and maps it onto the VRM 0.x humanoid bone vocabulary.
//!
//! # Example
//!
//! ```
//! use rigsmith_rig::synthesize;
//! use rigsmith_spec::ParameterSet;
//!
//! let armature = synthesize(&ParameterSet::default()).unwrap();
//! assert_eq!(armature.rig().root().name, "root");
//! assert_eq!(armature.mapping().get("hips"), Some("Hips"));
//! ```
//!
//! # Modules
//!
//! - [`proportions`]: Slider to body length solver
//! - [`builder`]: Bone ownership, mirrored pairs, rig finalization
//! - [`fingers`]: Finger chains and thumb splay
//! - [`ledger`]: Humanoid associations recorded during construction
//! - [`mapper`]: Ledger to name mapping
//! - [`armature`]: The full pipeline
//! - [`skin`]: Skin weight normalization

pub mod armature;
pub mod builder;
pub mod error;
pub mod fingers;
pub mod ledger;
pub mod mapper;
pub mod math;
pub mod proportions;
pub mod skin;

pub use armature::{synthesize, Armature, ArmatureSynthesizer};
pub use builder::{Bone, BoneId, BoneKind, BonePair, Rig, RigBuilder, Side};
pub use error::{RigError, RigResult};
pub use fingers::{Finger, FingerChain, FingerChainSynthesizer, FingerSegments, Segment};
pub use ledger::SynthesisLedger;
pub use mapper::map_to_schema;
pub use proportions::Proportions;
pub use skin::{normalize, normalize_weights_f32, to_transport_precision, WeightQuad};
