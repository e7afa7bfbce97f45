//! Features Module - Feature Encoding Engine
//!
//! Turns a typed clinical record into the dense vector the classifier was
//! trained on. Column order and presence come from `ExpectedColumns`.

pub mod schema;
pub mod input;
pub mod vector;
pub mod encoder;


// Re-export common types
pub use schema::{ExpectedColumns, SchemaError, SchemaInfo};
pub use input::{
    Categorical, ChestPainType, ExerciseAngina, RawInput, RestingEcg, Sex, StSlope,
    UnknownCategory, NUMERIC_COLUMNS,
};
pub use vector::{EncodedVector, FeatureMap};
pub use encoder::{encode, encode_detailed, encode_with_names, feature_map, project, Projection};
