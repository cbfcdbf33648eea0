use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use style_trend_algo::{ChartDimensions, PredictionResult, RankedBar, RenderModel, SynthesizedTrend};

use crate::response::AppError;
use crate::services::style_report::{build_report, chart_svg};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(trend_chart))
        .route("/svg", post(trend_chart_svg))
}

#[derive(Debug, Deserialize)]
struct TrendChartBody {
    #[serde(flatten)]
    result: PredictionResult,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendChartResponse {
    success: bool,
    bars: Vec<RankedBar>,
    trend: SynthesizedTrend,
    chart: RenderModel,
}

async fn trend_chart(
    body: Result<Json<TrendChartBody>, JsonRejection>,
) -> Result<Json<TrendChartResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let report = build_report(&body.result, &ChartDimensions::sanitized(body.width, body.height));

    Ok(Json(TrendChartResponse {
        success: true,
        bars: report.bars,
        trend: report.trend,
        chart: report.chart,
    }))
}

async fn trend_chart_svg(body: Result<Json<TrendChartBody>, JsonRejection>) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return AppError::bad_request(rejection.body_text()).into_response(),
    };
    let svg = chart_svg(&body.result, &ChartDimensions::sanitized(body.width, body.height));

    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}
