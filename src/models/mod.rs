//! Request/response models

pub mod patient;
pub mod prediction;
pub mod form;

pub use patient::*;
pub use prediction::*;
pub use form::*;
