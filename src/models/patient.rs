//! Patient record model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::logic::features::RawInput;

/// Request body for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 18, max = 100, message = "must be between 18 and 100"))]
    pub age: i64,

    pub sex: String,

    pub chest_pain_type: String,

    #[validate(range(min = 80, max = 200, message = "must be between 80 and 200 mmHg"))]
    pub resting_bp: i64,

    #[validate(range(min = 100, max = 600, message = "must be between 100 and 600 mg/dL"))]
    pub cholesterol: i64,

    #[validate(range(min = 0, max = 1, message = "must be 0 or 1"))]
    pub fasting_bs: i64,

    pub resting_ecg: String,

    #[validate(range(min = 60, max = 220, message = "must be between 60 and 220 bpm"))]
    pub max_hr: i64,

    pub exercise_angina: String,

    #[validate(range(min = 0.0, max = 6.0, message = "must be between 0.0 and 6.0"))]
    pub oldpeak: f64,

    pub st_slope: String,
}

/// Field order used when reporting the first invalid field
const FIELD_ORDER: &[&str] = &[
    "age",
    "sex",
    "chest_pain_type",
    "resting_bp",
    "cholesterol",
    "fasting_bs",
    "resting_ecg",
    "max_hr",
    "exercise_angina",
    "oldpeak",
    "st_slope",
];

impl PredictRequest {
    /// Range-check numeric fields and parse categories
    pub fn into_raw_input(self) -> Result<RawInput, AppError> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let first = FIELD_ORDER
                .iter()
                .find_map(|field| field_errors.get(*field).map(|errs| (*field, *errs)));

            if let Some((field, errs)) = first {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                return Err(AppError::validation(field, format!("{} {}", field, message)));
            }
            return Err(AppError::validation("request", errors.to_string()));
        }

        // Ranges are checked above, so the narrowing casts cannot truncate
        Ok(RawInput {
            age: self.age as u32,
            sex: self.sex.parse()?,
            chest_pain_type: self.chest_pain_type.parse()?,
            resting_bp: self.resting_bp as u32,
            cholesterol: self.cholesterol as u32,
            fasting_bs: self.fasting_bs == 1,
            resting_ecg: self.resting_ecg.parse()?,
            max_hr: self.max_hr as u32,
            exercise_angina: self.exercise_angina.parse()?,
            oldpeak: self.oldpeak,
            st_slope: self.st_slope.parse()?,
        })
    }
}
