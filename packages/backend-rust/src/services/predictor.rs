use std::time::Duration;

use serde::Deserialize;
use style_trend_algo::{Category, PredictionResult};
use thiserror::Error;
use tokio::time::sleep;
use tracing::warn;

use crate::config::PredictorConfig;
use crate::services::student_form::StudentPayload;

const PREDICT_PATH: &str = "/predict-style";
const BASE_BACKOFF_MS: u64 = 200;

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("predictor not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: reqwest::StatusCode, body: String },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("prediction response carried no result")]
    EmptyResponse,
}

/// Body returned by the prediction service. Older deployments only send the
/// winning class id.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorResponse {
    #[serde(flatten)]
    pub result: PredictionResult,
    #[serde(default)]
    pub learning_style_predicted: Option<i64>,
    #[serde(default)]
    pub prediction_id: Option<String>,
}

/// A usable prediction and the service's identifier for it, when it sent one
#[derive(Debug, Clone)]
pub struct Prediction {
    pub result: PredictionResult,
    pub prediction_id: Option<String>,
}

impl PredictorResponse {
    pub fn into_prediction(self) -> Result<Prediction, PredictorError> {
        let PredictorResponse {
            mut result,
            learning_style_predicted,
            prediction_id,
        } = self;

        let legacy = learning_style_predicted.and_then(Category::from_class_id);
        result.predicted_category = result.predicted_category.or(legacy);

        if result.has_no_entries() && result.predicted_category.is_none() {
            return Err(PredictorError::EmptyResponse);
        }

        Ok(Prediction {
            result,
            prediction_id,
        })
    }
}

#[derive(Clone)]
pub struct PredictorClient {
    config: PredictorConfig,
    client: reqwest::Client,
}

impl PredictorClient {
    pub fn from_config(config: PredictorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { config, client }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn predict(&self, payload: &StudentPayload) -> Result<Prediction, PredictorError> {
        let base = self.config.base_url.trim();
        if base.is_empty() {
            return Err(PredictorError::NotConfigured("PREDICTOR_URL"));
        }

        let url = format!("{}{}", base.trim_end_matches('/'), PREDICT_PATH);
        let response = self.post_with_retry(&url, payload).await?;
        response.into_prediction()
    }

    async fn post_with_retry(
        &self,
        url: &str,
        payload: &StudentPayload,
    ) -> Result<PredictorResponse, PredictorError> {
        let max_retries = self.config.max_retries;
        let mut last_error: Option<PredictorError> = None;

        for retry in 0..=max_retries {
            match self.client.post(url).json(payload).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let bytes = resp.bytes().await?;
                        return serde_json::from_slice(&bytes).map_err(|e| {
                            tracing::error!(
                                error = %e,
                                body = %String::from_utf8_lossy(&bytes),
                                "failed to parse prediction response"
                            );
                            PredictorError::Json(e)
                        });
                    }
                    let body = resp.text().await.unwrap_or_default();
                    let err = PredictorError::HttpStatus { status, body };
                    if retry < max_retries && is_retryable(status) {
                        warn!(retry, ?status, "prediction request failed, retrying");
                        sleep(backoff(retry)).await;
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
                Err(e) => {
                    let err = PredictorError::Request(e);
                    if retry < max_retries {
                        warn!(retry, error = %err, "prediction request error, retrying");
                        sleep(backoff(retry)).await;
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
            }
        }
        Err(last_error.unwrap_or(PredictorError::EmptyResponse))
    }
}

fn backoff(retry: usize) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS * (1u64 << retry.min(6)))
}

fn is_retryable(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}
