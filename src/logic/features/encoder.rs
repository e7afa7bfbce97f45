//! Feature Encoder
//!
//! Reconciles a `RawInput` with the trained column schema:
//!
//! 1. numeric fields are seeded under their canonical names
//! 2. each categorical field sets `<prefix>_<value>` to 1
//! 3. the map is projected onto the schema; absent columns become 0
//!
//! A map entry whose column is not in the schema is dropped, not rejected.
//! This keeps categories unseen at training time from failing the request,
//! and it also means a drifted input domain degrades silently. `Projection`
//! reports what was dropped so callers can log it.

use super::input::RawInput;
use super::schema::{ExpectedColumns, SchemaError};
use super::vector::{EncodedVector, FeatureMap};

/// Result of projecting a feature map onto a schema
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub vector: EncodedVector,
    /// Map entries with no matching column, in name order
    pub dropped: Vec<String>,
}

impl Projection {
    pub fn has_dropped(&self) -> bool {
        !self.dropped.is_empty()
    }
}

/// Sparse feature map for a raw input (steps 1 and 2)
pub fn feature_map(raw: &RawInput) -> FeatureMap {
    let mut map = FeatureMap::new();

    for (name, value) in raw.numeric_features() {
        map.insert(name, value);
    }

    for column in raw.categorical_columns() {
        map.insert(column, 1.0);
    }

    map
}

/// Project a feature map onto the schema (steps 3 and 4)
pub fn project(map: &FeatureMap, columns: &ExpectedColumns) -> Projection {
    let mut vector = EncodedVector::zeros(columns);
    let mut dropped = Vec::new();

    for (name, value) in map.iter() {
        match columns.position(name) {
            Some(position) => vector.values[position] = value,
            // Unknown column: no slot in the trained schema
            None => dropped.push(name.to_string()),
        }
    }

    Projection { vector, dropped }
}

/// Encode a raw input, reporting dropped columns
pub fn encode_detailed(raw: &RawInput, columns: &ExpectedColumns) -> Projection {
    project(&feature_map(raw), columns)
}

/// Encode a raw input into a dense vector aligned to `columns`
pub fn encode(raw: &RawInput, columns: &ExpectedColumns) -> EncodedVector {
    encode_detailed(raw, columns).vector
}

/// Encode against an unvalidated column list
pub fn encode_with_names(raw: &RawInput, columns: &[String]) -> Result<EncodedVector, SchemaError> {
    let schema = ExpectedColumns::new(columns.iter().cloned())?;
    Ok(encode(raw, &schema))
}
