//! Raw clinical input
//!
//! Typed form of one prediction request. Numeric fields are written into the
//! vector under their canonical column names, categorical fields become
//! `<prefix>_<value>` one-hot columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// CANONICAL NUMERIC COLUMNS
// ============================================================================

pub const COL_AGE: &str = "Age";
pub const COL_RESTING_BP: &str = "RestingBP";
pub const COL_CHOLESTEROL: &str = "Cholesterol";
pub const COL_FASTING_BS: &str = "FastingBS";
pub const COL_MAX_HR: &str = "MaxHR";
pub const COL_OLDPEAK: &str = "Oldpeak";

/// Numeric column names in the order they are seeded into the feature map
pub const NUMERIC_COLUMNS: &[&str] = &[
    COL_AGE,
    COL_RESTING_BP,
    COL_CHOLESTEROL,
    COL_FASTING_BS,
    COL_MAX_HR,
    COL_OLDPEAK,
];

// ============================================================================
// CATEGORICAL FIELDS
// ============================================================================

/// Unrecognized categorical value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value '{value}' for {field} (expected one of: {allowed})")]
pub struct UnknownCategory {
    pub field: &'static str,
    pub value: String,
    pub allowed: String,
}

/// A categorical field that is one-hot encoded under a column prefix
pub trait Categorical: Copy + Sized + 'static {
    /// Column prefix, e.g. `ChestPainType`
    const PREFIX: &'static str;

    /// Request field name, used in validation errors
    const FIELD: &'static str;

    /// Every value in the field's domain
    fn all() -> &'static [Self];

    /// Category label as it appears in column names
    fn as_str(&self) -> &'static str;

    /// Synthetic one-hot column name: `<prefix>_<value>`
    fn column_name(&self) -> String {
        format!("{}_{}", Self::PREFIX, self.as_str())
    }

    /// Column names for the whole domain
    fn domain_columns() -> Vec<String> {
        Self::all().iter().map(|v| v.column_name()).collect()
    }

    fn parse_category(value: &str) -> Result<Self, UnknownCategory> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == value)
            .ok_or_else(|| UnknownCategory {
                field: Self::FIELD,
                value: value.to_string(),
                allowed: Self::all()
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, prefix = $prefix:literal, field = $field:literal,
        { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Categorical for $name {
            const PREFIX: &'static str = $prefix;
            const FIELD: &'static str = $field;

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_category(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical!(
    /// Biological sex
    Sex, prefix = "Sex", field = "sex",
    { Male => "M", Female => "F" }
);

categorical!(
    /// Chest pain type: typical angina, atypical angina, non-anginal, asymptomatic
    ChestPainType, prefix = "ChestPainType", field = "chest_pain_type",
    { Ata => "ATA", Nap => "NAP", Ta => "TA", Asy => "ASY" }
);

categorical!(
    /// Resting electrocardiogram result
    RestingEcg, prefix = "RestingECG", field = "resting_ecg",
    { Normal => "Normal", St => "ST", Lvh => "LVH" }
);

categorical!(
    /// Exercise-induced angina
    ExerciseAngina, prefix = "ExerciseAngina", field = "exercise_angina",
    { Yes => "Y", No => "N" }
);

categorical!(
    /// Slope of the peak exercise ST segment
    StSlope, prefix = "ST_Slope", field = "st_slope",
    { Up => "Up", Flat => "Flat", Down => "Down" }
);

// ============================================================================
// RAW INPUT
// ============================================================================

/// One prediction request in typed form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub age: u32,
    pub sex: Sex,
    pub chest_pain_type: ChestPainType,
    pub resting_bp: u32,
    pub cholesterol: u32,
    pub fasting_bs: bool,
    pub resting_ecg: RestingEcg,
    pub max_hr: u32,
    pub exercise_angina: ExerciseAngina,
    pub oldpeak: f64,
    pub st_slope: StSlope,
}

impl RawInput {
    /// Numeric fields keyed by canonical column name
    pub fn numeric_features(&self) -> [(&'static str, f64); 6] {
        [
            (COL_AGE, f64::from(self.age)),
            (COL_RESTING_BP, f64::from(self.resting_bp)),
            (COL_CHOLESTEROL, f64::from(self.cholesterol)),
            (COL_FASTING_BS, if self.fasting_bs { 1.0 } else { 0.0 }),
            (COL_MAX_HR, f64::from(self.max_hr)),
            (COL_OLDPEAK, self.oldpeak),
        ]
    }

    /// Synthetic one-hot column for each categorical field
    pub fn categorical_columns(&self) -> [String; 5] {
        [
            self.sex.column_name(),
            self.chest_pain_type.column_name(),
            self.resting_ecg.column_name(),
            self.exercise_angina.column_name(),
            self.st_slope.column_name(),
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================
