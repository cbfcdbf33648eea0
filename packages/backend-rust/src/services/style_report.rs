use serde::Serialize;
use style_trend_algo::{
    ranked_bars, render_svg, render_trend, synthesize_prediction, Category, ChartDimensions,
    PredictionEntry, PredictionResult, RankedBar, RenderModel, SynthesizedTrend,
};

/// Bars, synthesized trend and chart geometry for one prediction result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleReport {
    /// The service's named winner, else the emphasized category
    pub predicted_style: Category,
    pub predictions: Vec<PredictionEntry>,
    pub bars: Vec<RankedBar>,
    pub trend: SynthesizedTrend,
    pub chart: RenderModel,
}

pub fn trend_for(result: &PredictionResult) -> SynthesizedTrend {
    let trend = synthesize_prediction(result);
    if trend.used_fallback {
        tracing::debug!(
            entries = result.predictions.len(),
            rejected = result.rejected_entries,
            "prediction set malformed, using uniform distribution"
        );
    }
    if trend.top.is_defaulted() {
        tracing::debug!("no best match flagged, emphasizing first category");
    }
    trend
}

pub fn build_report(result: &PredictionResult, dims: &ChartDimensions) -> StyleReport {
    let trend = trend_for(result);
    let chart = render_trend(&trend, dims);

    StyleReport {
        predicted_style: result.predicted_category.unwrap_or(trend.top.category()),
        predictions: result.predictions.clone(),
        bars: ranked_bars(result),
        trend,
        chart,
    }
}

pub fn chart_svg(result: &PredictionResult, dims: &ChartDimensions) -> String {
    render_svg(&render_trend(&trend_for(result), dims))
}
