//! Model information handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::logic::features::SchemaInfo;
use crate::logic::model::Classifier;
use crate::models::{form_schema, FormSchema};

#[derive(Serialize)]
pub struct ModelInfoResponse {
    classifier: &'static str,
    feature_count: usize,
    schema: SchemaInfo,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Loaded model and column schema
pub async fn info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let classifier = state.context.classifier();

    Json(ModelInfoResponse {
        classifier: classifier.name(),
        feature_count: classifier.n_features(),
        schema: state.context.columns().info(),
        loaded_at: state.context.loaded_at(),
    })
}

/// Input form description
pub async fn form() -> Json<FormSchema> {
    Json(form_schema())
}
