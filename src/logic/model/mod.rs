//! Model Module - Inference Engine
//!
//! Scaler and classifier artifacts plus the prediction pipeline.
//! New model families plug in behind the `Classifier` trait.

pub mod inference;
pub mod scaler;
pub mod knn;
pub mod logistic;

// Re-export common types
pub use inference::{
    predict, ClassProbabilities, Classifier, ClassifierModel, InferenceError, PredictionResult,
    RiskLabel,
};
pub use scaler::StandardScaler;
pub use knn::{KNeighborsClassifier, Weighting};
pub use logistic::LogisticClassifier;
