//! Shared logic for prediction-style speech APIs.

mod prediction;

pub(crate) use prediction::{DEFAULT_PREDICTION_BASE_URL, run_prediction};
