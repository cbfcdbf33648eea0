use serde::Serialize;
use style_trend_algo::{
    ranked_bars, render_svg, render_trend, synthesize_prediction, Category, ChartDimensions,
    PredictionEntry, PredictionResult, RankedBar, RenderModel, SynthesizedTrend,
};
use wasm_bindgen::prelude::*;

/// Chart output handed back to the page in one call
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartBundle {
    bars: Vec<RankedBar>,
    trend: SynthesizedTrend,
    chart: RenderModel,
}

#[wasm_bindgen]
pub struct TrendChartRenderer {
    dims: ChartDimensions,
    last_used_fallback: bool,
    last_top_defaulted: bool,
}

impl Default for TrendChartRenderer {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[wasm_bindgen]
impl TrendChartRenderer {
    /// Missing or unusable sizes keep the default 760x260 canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: Option<f64>, height: Option<f64>) -> Self {
        Self {
            dims: ChartDimensions::sanitized(width, height),
            last_used_fallback: false,
            last_top_defaulted: false,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.dims.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.dims.height
    }

    /// Whether the last render replaced a malformed prediction set
    #[wasm_bindgen(getter)]
    pub fn used_fallback(&self) -> bool {
        self.last_used_fallback
    }

    #[wasm_bindgen(getter)]
    pub fn top_defaulted(&self) -> bool {
        self.last_top_defaulted
    }

    /// Render a prediction result (`{predicted_style, predictions}`) to the
    /// full chart model. Malformed entries fall back to the uniform
    /// distribution; only a value that is not an object at all is an error.
    #[wasm_bindgen]
    pub fn render(&mut self, result_js: JsValue) -> Result<JsValue, JsValue> {
        let result = parse_result(result_js)?;
        let bundle = self.bundle(&result);
        serde_wasm_bindgen::to_value(&bundle).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn render_svg(&mut self, result_js: JsValue) -> Result<String, JsValue> {
        let result = parse_result(result_js)?;
        Ok(self.svg(&result))
    }

    /// Same as `render_svg`, from plain arrays: finals in category order and
    /// the index of the best match (`undefined` when none was flagged)
    #[wasm_bindgen]
    pub fn render_svg_from_finals(&mut self, finals: &[f64], top_index: Option<usize>) -> String {
        self.svg(&result_from_finals(finals, top_index))
    }

    /// Synthesized values, series after series, `4 * 7` numbers
    #[wasm_bindgen]
    pub fn series_values(&mut self, finals: &[f64], top_index: Option<usize>) -> Vec<i32> {
        let trend = self.synthesize(&result_from_finals(finals, top_index));
        trend.series.iter().flat_map(|s| s.values()).collect()
    }

    #[wasm_bindgen]
    pub fn ranked_bars(&self, result_js: JsValue) -> Result<JsValue, JsValue> {
        let result = parse_result(result_js)?;
        serde_wasm_bindgen::to_value(&ranked_bars(&result)).map_err(to_js_error)
    }
}

impl TrendChartRenderer {
    fn synthesize(&mut self, result: &PredictionResult) -> SynthesizedTrend {
        let trend = synthesize_prediction(result);
        self.last_used_fallback = trend.used_fallback;
        self.last_top_defaulted = trend.top.is_defaulted();
        trend
    }

    fn bundle(&mut self, result: &PredictionResult) -> ChartBundle {
        let trend = self.synthesize(result);
        let chart = render_trend(&trend, &self.dims);
        ChartBundle {
            bars: ranked_bars(result),
            trend,
            chart,
        }
    }

    fn svg(&mut self, result: &PredictionResult) -> String {
        let trend = self.synthesize(result);
        render_svg(&render_trend(&trend, &self.dims))
    }
}

fn parse_result(result_js: JsValue) -> Result<PredictionResult, JsValue> {
    serde_wasm_bindgen::from_value(result_js).map_err(to_js_error)
}

fn to_js_error(err: serde_wasm_bindgen::Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Entries in category order; anything other than four finals yields an
/// empty set so the synthesizer falls back to the uniform distribution
fn result_from_finals(finals: &[f64], top_index: Option<usize>) -> PredictionResult {
    let predictions = if finals.len() == Category::ALL.len() {
        Category::ALL
            .iter()
            .zip(finals)
            .map(|(category, &value)| {
                PredictionEntry::new(*category, value, Some(category.index()) == top_index)
            })
            .collect()
    } else {
        Vec::new()
    };

    PredictionResult::new(None, predictions)
}
