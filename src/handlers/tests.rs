//! Router tests
//!
//! Drive the full axum stack in-process against small in-memory artifacts.

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::logic::features::ExpectedColumns;
    use crate::logic::model::{ClassifierModel, KNeighborsClassifier, StandardScaler};
    use crate::{create_router, AppState, ModelContext};

    const COLUMNS: &[&str] = &[
        "Age", "RestingBP", "Cholesterol", "FastingBS", "MaxHR", "Oldpeak",
        "Sex_M", "Sex_F",
        "ChestPainType_ATA", "ChestPainType_ASY", "ChestPainType_NAP", "ChestPainType_TA",
        "RestingECG_Normal", "RestingECG_ST", "RestingECG_LVH",
        "ExerciseAngina_Y", "ExerciseAngina_N",
        "ST_Slope_Up", "ST_Slope_Flat", "ST_Slope_Down",
    ];

    const REFERENCE_VECTOR: [f64; 20] = [
        40.0, 120.0, 200.0, 0.0, 150.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
        1.0, 1.0, 0.0, 0.0,
    ];

    fn app_with_columns(columns: &[&str]) -> Router {
        let columns = ExpectedColumns::new(columns.iter().copied()).unwrap();
        let width = columns.len();

        let reference: Vec<f64> = REFERENCE_VECTOR[..width].to_vec();
        let mut older = reference.clone();
        older[0] += 1.0;

        let classifier = ClassifierModel::Knn(
            KNeighborsClassifier::new(3, vec![reference, older, vec![0.0; width]], vec![1, 1, 0])
                .unwrap(),
        );
        let context =
            ModelContext::new(columns, StandardScaler::identity(width), classifier).unwrap();

        create_router(AppState {
            context: Arc::new(context),
            config: Config::from_lookup(|_| None),
        })
    }

    fn app() -> Router {
        app_with_columns(COLUMNS)
    }

    fn reference_body() -> Value {
        json!({
            "age": 40, "sex": "M", "chest_pain_type": "ATA", "resting_bp": 120,
            "cholesterol": 200, "fasting_bs": 0, "resting_ecg": "Normal", "max_hr": 150,
            "exercise_angina": "N", "oldpeak": 1.0, "st_slope": "Up"
        })
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_predict_reference_input() {
        let (status, body) = send(app(), post("/predict", reference_body().to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "High Risk");
        let percent = body["risk_percent"].as_f64().unwrap();
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(body["risk_band"], "moderate");
    }

    #[tokio::test]
    async fn test_versioned_route_matches() {
        let (_, plain) = send(app(), post("/predict", reference_body().to_string())).await;
        let (status, versioned) =
            send(app(), post("/api/v1/predict", reference_body().to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plain, versioned);
    }

    #[tokio::test]
    async fn test_unknown_enum_names_field() {
        let mut body = reference_body();
        body["st_slope"] = json!("Sideways");

        let (status, body) = send(app(), post("/predict", body.to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "st_slope");
        assert_eq!(body["status"], 422);
    }

    #[tokio::test]
    async fn test_out_of_range_names_field() {
        let mut body = reference_body();
        body["max_hr"] = json!(300);

        let (status, body) = send(app(), post("/predict", body.to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "max_hr");
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (status, body) = send(app(), post("/predict", "{\"age\": 40")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_missing_field() {
        let mut body = reference_body();
        body.as_object_mut().unwrap().remove("oldpeak");

        let (status, body) = send(app(), post("/predict", body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_category_missing_from_schema_is_ignored() {
        // Schema without any sex columns: the selection cannot affect the score
        let columns: Vec<&str> =
            COLUMNS.iter().copied().filter(|c| !c.starts_with("Sex_")).collect();
        let reduced = || app_with_columns(&columns);

        let mut female = reference_body();
        female["sex"] = json!("F");

        let (status, male_body) = send(reduced(), post("/predict", reference_body().to_string())).await;
        assert_eq!(status, StatusCode::OK);
        let (_, female_body) = send(reduced(), post("/predict", female.to_string())).await;
        assert_eq!(male_body, female_body);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["classifier"], "knn");
        assert_eq!(body["column_count"], 20);
        assert_eq!(body["environment"], "development");
    }

    #[tokio::test]
    async fn test_model_info() {
        let (status, body) = send(app(), get("/api/v1/model")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feature_count"], 20);
        assert_eq!(body["schema"]["columns"][6], "Sex_M");
        assert_eq!(body["schema"]["column_count"], 20);
    }

    #[test]
    fn test_form() {
        let (status, body) = tokio_test::block_on(send(app(), get("/api/v1/form")));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fields"].as_array().unwrap().len(), 11);
        assert_eq!(body["fields"][0]["name"], "age");
        assert_eq!(body["fields"][0]["kind"], "number");
        assert!(body["disclaimer"].as_str().unwrap().contains("educational"));
    }
}
