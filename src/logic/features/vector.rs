//! Feature Map & Encoded Vector
//!
//! `FeatureMap` is the sparse, name-keyed intermediate form. `EncodedVector`
//! is the dense form aligned to an `ExpectedColumns` schema and tagged with
//! that schema's fingerprint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::schema::ExpectedColumns;

// ============================================================================
// FEATURE MAP
// ============================================================================

/// Sparse column-name → value mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMap {
    entries: BTreeMap<String, f64>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.entries.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ============================================================================
// ENCODED VECTOR
// ============================================================================

/// Dense feature vector in schema order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedVector {
    /// CRC32 fingerprint of the schema this vector was projected onto
    pub schema_fingerprint: u32,
    /// One value per expected column
    pub values: Vec<f64>,
}

impl EncodedVector {
    /// Zero vector for a schema
    pub fn zeros(schema: &ExpectedColumns) -> Self {
        Self {
            schema_fingerprint: schema.fingerprint(),
            values: vec![0.0; schema.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Value of a named column under the given schema
    pub fn get_by_name(&self, schema: &ExpectedColumns, name: &str) -> Option<f64> {
        schema.position(name).and_then(|i| self.get(i))
    }

    /// True if this vector was built for `schema`
    pub fn matches(&self, schema: &ExpectedColumns) -> bool {
        self.schema_fingerprint == schema.fingerprint() && self.len() == schema.len()
    }

    /// Named values for debug logging
    pub fn to_log_entry(&self, schema: &ExpectedColumns) -> serde_json::Value {
        serde_json::json!({
            "schema_fingerprint": format!("{:08x}", self.schema_fingerprint),
            "named_values": schema.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
