//! rigsmith End-to-End Test Infrastructure
//!
//! Integration tests for the synthesis pipeline:
//!
//! - Generation: parameters -> rig, mapping, document
//! - Schema: humanoid mapping validation against VRM 0.x
//! - Properties: symmetry, finger lengths, weight normalization
//! - CLI: command functions against files on disk
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rigsmith-tests
//! ```

pub mod fixtures;
