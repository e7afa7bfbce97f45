//! Prediction logic
//!
//! Independent of HTTP: feature encoding, inference and artifact loading.

pub mod features;
pub mod model;
pub mod artifacts;

pub use artifacts::{ArtifactError, ArtifactPaths, ModelContext};
