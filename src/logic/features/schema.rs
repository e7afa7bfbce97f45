//! Expected Columns - Column schema the classifier was trained on
//!
//! **This type controls the positional encoding of every feature vector.**
//!
//! ## Rules:
//! 1. Never empty
//! 2. Every name appears exactly once
//! 3. Order must match what the scaler/classifier were fitted on
//!
//! A CRC32 fingerprint of the ordered names is exposed so schema drift
//! between deployments shows up in logs and health checks.

use std::collections::HashMap;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("expected column list is empty")]
    Empty,

    #[error("column '{name}' appears more than once (positions {first} and {second})")]
    Duplicate {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("column name at position {0} is blank")]
    BlankName(usize),
}

// ============================================================================
// EXPECTED COLUMNS
// ============================================================================

/// Ordered, duplicate-free column schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedColumns {
    names: Vec<String>,
    index: HashMap<String, usize>,
    fingerprint: u32,
}

impl ExpectedColumns {
    /// Validate and index a column list
    pub fn new<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SchemaError::BlankName(position));
            }
            if let Some(&first) = index.get(name) {
                return Err(SchemaError::Duplicate {
                    name: name.clone(),
                    first,
                    second: position,
                });
            }
            index.insert(name.clone(), position);
        }

        let fingerprint = compute_fingerprint(&names);

        Ok(Self { names, index, fingerprint })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Position of a column (O(1))
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column name at a position
    pub fn name(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    pub fn info(&self) -> SchemaInfo {
        SchemaInfo {
            fingerprint: format!("{:08x}", self.fingerprint),
            column_count: self.len(),
            columns: self.names.clone(),
        }
    }
}

impl TryFrom<Vec<String>> for ExpectedColumns {
    type Error = SchemaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

/// Hash every name in order, NUL separated
fn compute_fingerprint(names: &[String]) -> u32 {
    let mut hasher = Hasher::new();
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

// ============================================================================
// SCHEMA INFO
// ============================================================================

/// Serializable schema summary for logging and the model-info endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub fingerprint: String,
    pub column_count: usize,
    pub columns: Vec<String>,
}

// ============================================================================
// TESTS
// ============================================================================
