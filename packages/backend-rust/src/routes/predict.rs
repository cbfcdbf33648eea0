use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use style_trend_algo::ChartDimensions;
use uuid::Uuid;

use crate::response::AppError;
use crate::routes::health::now_iso;
use crate::services::student_form::StudentForm;
use crate::services::style_report::{build_report, StyleReport};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(predict_style))
}

#[derive(Debug, Deserialize)]
struct ChartSizeQuery {
    width: Option<f64>,
    height: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictStyleResponse {
    success: bool,
    request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prediction_id: Option<String>,
    predicted_at: String,
    #[serde(flatten)]
    report: StyleReport,
}

async fn predict_style(
    State(state): State<AppState>,
    Query(size): Query<ChartSizeQuery>,
    body: Result<Json<StudentForm>, JsonRejection>,
) -> Result<Json<PredictStyleResponse>, AppError> {
    let Json(form) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let payload = form.to_payload();
    payload.validate().map_err(|details| {
        tracing::info!(fields = details.len(), "student payload rejected");
        AppError::validation(details)
    })?;

    let request_id = Uuid::new_v4().to_string();
    let prediction = state.predictor().predict(&payload).await.map_err(|err| {
        tracing::error!(%request_id, error = %err, "prediction service call failed");
        AppError::from(err)
    })?;

    let report = build_report(
        &prediction.result,
        &ChartDimensions::sanitized(size.width, size.height),
    );
    tracing::info!(
        %request_id,
        predicted_style = %report.predicted_style,
        fallback = report.trend.used_fallback,
        "prediction rendered"
    );

    Ok(Json(PredictStyleResponse {
        success: true,
        request_id,
        prediction_id: prediction.prediction_id,
        predicted_at: now_iso(),
        report,
    }))
}
