//! Input form descriptors
//!
//! Describes each request field the way the web client renders it: label,
//! help text, bounds and defaults. Bounds mirror the validation ranges on
//! `PredictRequest`.

use serde::Serialize;

use crate::logic::features::{
    Categorical, ChestPainType, ExerciseAngina, RestingEcg, Sex, StSlope,
};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldInput {
    Number { min: f64, max: f64, default: f64, step: f64 },
    Choice { options: Vec<String>, default: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    /// Form section the field belongs to
    pub section: &'static str,
    #[serde(flatten)]
    pub input: FieldInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: Vec<FieldDescriptor>,
    pub risk_factors: Vec<&'static str>,
    pub disclaimer: &'static str,
}

const PERSONAL: &str = "Personal Information";
const CLINICAL: &str = "Clinical Measurements";
const CARDIAC: &str = "Cardiac Metrics";

fn number(
    name: &'static str,
    label: &'static str,
    help: &'static str,
    section: &'static str,
    (min, max, default, step): (f64, f64, f64, f64),
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        label,
        help,
        section,
        input: FieldInput::Number { min, max, default, step },
    }
}

fn choice<C: Categorical>(
    label: &'static str,
    help: &'static str,
    section: &'static str,
    default: C,
) -> FieldDescriptor {
    FieldDescriptor {
        name: C::FIELD,
        label,
        help,
        section,
        input: FieldInput::Choice {
            options: C::all().iter().map(|v| v.as_str().to_string()).collect(),
            default: default.as_str().to_string(),
        },
    }
}

fn fasting_bs() -> FieldDescriptor {
    FieldDescriptor {
        name: "fasting_bs",
        label: "Fasting Blood Sugar > 120 mg/dL",
        help: "Fasting glucose level (1 = yes, 0 = no)",
        section: CLINICAL,
        input: FieldInput::Choice {
            options: vec!["0".to_string(), "1".to_string()],
            default: "0".to_string(),
        },
    }
}

/// Full form description served at `GET /api/v1/form`
pub fn form_schema() -> FormSchema {
    FormSchema {
        title: "Heart Disease Risk Predictor",
        subtitle: "Assess your cardiovascular health with machine learning analysis",
        fields: vec![
            number("age", "Age", "Your age in years", PERSONAL, (18.0, 100.0, 40.0, 1.0)),
            choice("Sex", "Biological sex", PERSONAL, Sex::Male),
            choice("Chest Pain Type", "Type of chest pain experienced", PERSONAL, ChestPainType::Ata),
            choice("Exercise Angina", "Chest pain induced by exercise", PERSONAL, ExerciseAngina::Yes),
            number(
                "resting_bp",
                "Resting Blood Pressure (mmHg)",
                "BP when at rest",
                CLINICAL,
                (80.0, 200.0, 120.0, 1.0),
            ),
            number(
                "cholesterol",
                "Cholesterol (mg/dL)",
                "Total cholesterol level",
                CLINICAL,
                (100.0, 600.0, 200.0, 1.0),
            ),
            fasting_bs(),
            choice("Resting ECG Result", "ECG reading at rest", CLINICAL, RestingEcg::Normal),
            number(
                "max_hr",
                "Maximum Heart Rate (bpm)",
                "Highest heart rate achieved",
                CARDIAC,
                (60.0, 220.0, 150.0, 1.0),
            ),
            number(
                "oldpeak",
                "ST Depression (Oldpeak)",
                "ST segment depression",
                CARDIAC,
                (0.0, 6.0, 1.0, 0.1),
            ),
            choice("ST Slope", "Slope of ST segment", CARDIAC, StSlope::Up),
        ],
        risk_factors: vec![
            "Age & Sex: risk increases with age; males typically have higher risk at younger ages",
            "Chest Pain Type: different patterns indicate different severity levels",
            "Blood Pressure & Cholesterol: higher levels increase artery blockage risk",
            "Heart Rate & Exercise Response: how the heart responds to stress matters",
            "ECG Findings: shows electrical activity of the heart",
        ],
        disclaimer: "This tool is for educational and informational purposes only. It should not \
            be used as a substitute for professional medical advice, diagnosis, or treatment. \
            Always consult with a qualified healthcare provider for personalized medical guidance.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictRequest;

    /// Request built from every field's default
    fn default_request(schema: &FormSchema) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        for field in &schema.fields {
            let value = match &field.input {
                FieldInput::Number { default, step, .. } if *step >= 1.0 => {
                    serde_json::json!(*default as i64)
                }
                FieldInput::Number { default, .. } => serde_json::json!(default),
                FieldInput::Choice { default, .. } if field.name == "fasting_bs" => {
                    serde_json::json!(default.parse::<i64>().unwrap())
                }
                FieldInput::Choice { default, .. } => serde_json::json!(default),
            };
            body.insert(field.name.to_string(), value);
        }
        serde_json::Value::Object(body)
    }

    #[test]
    fn test_every_request_field_described() {
        let schema = form_schema();
        assert_eq!(schema.fields.len(), 11);
        let request: PredictRequest = serde_json::from_value(default_request(&schema)).unwrap();
        assert!(request.into_raw_input().is_ok());
    }

    #[test]
    fn test_numeric_bounds_accepted_by_validation() {
        let schema = form_schema();
        for field in &schema.fields {
            let FieldInput::Number { min, max, .. } = &field.input else { continue };
            for bound in [*min, *max] {
                let mut body = default_request(&schema);
                body[field.name] = if field.name == "oldpeak" {
                    serde_json::json!(bound)
                } else {
                    serde_json::json!(bound as i64)
                };
                let request: PredictRequest = serde_json::from_value(body).unwrap();
                assert!(request.into_raw_input().is_ok(), "{} = {} rejected", field.name, bound);
            }
        }
    }

    #[test]
    fn test_choice_options_come_from_domain() {
        let schema = form_schema();
        let slope = schema.fields.iter().find(|f| f.name == "st_slope").unwrap();
        match &slope.input {
            FieldInput::Choice { options, default } => {
                assert_eq!(options, &vec!["Up", "Flat", "Down"]);
                assert_eq!(default, "Up");
            }
            other => panic!("unexpected input {other:?}"),
        }
    }
}
