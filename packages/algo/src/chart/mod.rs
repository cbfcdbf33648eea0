//! Chart Renderer
//!
//! Projects synthesized series into a fixed coordinate space: a shared
//! vertical scale from the global min/max of every value, five gridlines with
//! tick labels, one polyline and one marker per phase for each series.
//!
//! Rendering is a pure function of its inputs; the same series, top index and
//! dimensions always give the same geometry.

pub mod svg;

use serde::Serialize;

use crate::trend::SynthesizedTrend;
use crate::types::{
    AnalysisPhase, Category, ChartDimensions, ChartStyle, Series, StrokeStyle, CHART_STYLE,
    GRID_FRACTIONS,
};

/// Shared axis scaling for one render
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartScale {
    pub min: f64,
    pub max: f64,
    pub phase_count: usize,
    pub dims: ChartDimensions,
}

impl ChartScale {
    /// Global min/max across every value of every series. No values at all is
    /// treated as a flat range at 0.
    pub fn fit(series: &[Series], dims: ChartDimensions) -> Self {
        let mut values = series.iter().flat_map(Series::values).map(f64::from).peekable();
        let (min, max) = if values.peek().is_none() {
            (0.0, 0.0)
        } else {
            values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
        };
        let phase_count = series.iter().map(Series::len).max().unwrap_or(0);

        Self {
            min,
            max,
            phase_count,
            dims,
        }
    }

    /// Vertical denominator; a flat range divides by 1
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }

    /// Horizontal position of phase `i`
    pub fn x(&self, i: usize) -> f64 {
        let pad = self.dims.padding;
        if self.phase_count <= 1 {
            return pad.left;
        }
        pad.left + (i as f64 * self.dims.plot_width() / (self.phase_count - 1) as f64)
    }

    /// Vertical position of value `v`; higher values sit higher on screen
    pub fn y(&self, v: f64) -> f64 {
        self.dims.padding.top + ((self.max - v) * self.dims.plot_height() / self.span())
    }

    /// Vertical position of a gridline at fraction `t` from the top
    pub fn grid_y(&self, t: f64) -> f64 {
        self.dims.padding.top + t * self.dims.plot_height()
    }

    /// Tick value for fraction `t` from the top
    pub fn tick_value(&self, t: f64) -> i64 {
        (self.max - t * (self.max - self.min)).round() as i64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gridline {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub fill: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub phase_index: usize,
    pub value: i32,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPath {
    pub category: Category,
    pub color: &'static str,
    /// Path data, `M x y L x y ...` with two decimals
    pub d: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub emphasized: bool,
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItem {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    /// Final match percentage, the last value of the category's series
    pub match_percent: Option<i32>,
}

/// Everything a presentation layer needs to draw the chart
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub width: f64,
    pub height: f64,
    pub global_min: f64,
    pub global_max: f64,
    pub top_category: Option<Category>,
    pub caption: String,
    pub gridlines: Vec<Gridline>,
    pub y_labels: Vec<AxisLabel>,
    pub x_labels: Vec<AxisLabel>,
    pub series: Vec<SeriesPath>,
    pub legend: Vec<LegendItem>,
}

impl RenderModel {
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Render with the default presentation constants
pub fn render(series: &[Series], top_index: usize, dims: &ChartDimensions) -> RenderModel {
    render_with_style(series, top_index, dims, &CHART_STYLE)
}

/// Render a synthesized trend, emphasizing its resolved top category
pub fn render_trend(trend: &SynthesizedTrend, dims: &ChartDimensions) -> RenderModel {
    render(&trend.series, trend.top_index(), dims)
}

pub fn render_with_style(
    series: &[Series],
    top_index: usize,
    dims: &ChartDimensions,
    style: &ChartStyle,
) -> RenderModel {
    let scale = ChartScale::fit(series, *dims);
    let pad = dims.padding;

    let gridlines = GRID_FRACTIONS
        .iter()
        .map(|&t| Gridline {
            x1: pad.left,
            x2: dims.width - pad.right,
            y: scale.grid_y(t),
            stroke: style.grid_color,
            stroke_width: style.grid_width,
        })
        .collect();

    let y_labels = GRID_FRACTIONS
        .iter()
        .map(|&t| AxisLabel {
            text: scale.tick_value(t).to_string(),
            x: style.y_label_x,
            y: scale.grid_y(t) + style.y_label_baseline,
            font_size: style.y_label_font_size,
            anchor: TextAnchor::Start,
            fill: style.label_color,
        })
        .collect();

    let x_labels = AnalysisPhase::ALL
        .iter()
        .take(scale.phase_count)
        .enumerate()
        .map(|(i, phase)| AxisLabel {
            text: phase.label().to_string(),
            x: scale.x(i),
            y: dims.height - style.x_label_inset,
            font_size: style.x_label_font_size,
            anchor: TextAnchor::Middle,
            fill: style.label_color,
        })
        .collect();

    let paths = series
        .iter()
        .enumerate()
        .map(|(si, s)| {
            let emphasized = si == top_index;
            let stroke = if emphasized { style.top } else { style.other };
            series_path(s, &scale, stroke, emphasized, style)
        })
        .collect();

    let top_category = series.get(top_index).map(|s| s.category);

    let legend = series
        .iter()
        .map(|s| LegendItem {
            category: s.category,
            label: s.category.label(),
            color: s.category.color(),
            match_percent: s.last_value(),
        })
        .collect();

    RenderModel {
        width: dims.width,
        height: dims.height,
        global_min: scale.min,
        global_max: scale.max,
        top_category,
        caption: caption(top_category, series.get(top_index)),
        gridlines,
        y_labels,
        x_labels,
        series: paths,
        legend,
    }
}

fn series_path(
    series: &Series,
    scale: &ChartScale,
    stroke: StrokeStyle,
    emphasized: bool,
    style: &ChartStyle,
) -> SeriesPath {
    let color = series.category.color();

    let d = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!(
                "{cmd} {:.2} {:.2}",
                scale.x(p.phase_index),
                scale.y(f64::from(p.value))
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let markers = series
        .points
        .iter()
        .map(|p| Marker {
            phase_index: p.phase_index,
            value: p.value,
            cx: scale.x(p.phase_index),
            cy: scale.y(f64::from(p.value)),
            r: stroke.marker_radius,
            fill: color,
            stroke: style.marker_stroke,
            stroke_width: style.marker_stroke_width,
        })
        .collect();

    SeriesPath {
        category: series.category,
        color,
        d,
        stroke_width: stroke.width,
        stroke_opacity: stroke.opacity,
        emphasized,
        markers,
    }
}

fn caption(top: Option<Category>, series: Option<&Series>) -> String {
    match (top, series.and_then(Series::last_value)) {
        (Some(category), Some(value)) => format!(
            "Each phase of analysis builds confidence in the prediction, with your dominant style ({category}) showing the strongest match at {value}%."
        ),
        _ => "Not enough data to identify a dominant style.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::synthesize;
    use crate::types::{Padding, PredictionEntry, CATEGORY_COUNT, PHASE_COUNT};
    use proptest::prelude::*;

    fn flat_series(value: i32) -> Vec<Series> {
        Category::ALL
            .iter()
            .map(|&c| Series::from_values(c, vec![value; PHASE_COUNT]))
            .collect()
    }

    fn sample_series() -> [Series; CATEGORY_COUNT] {
        let entries = [
            PredictionEntry::new(Category::Visual, 62.0, true),
            PredictionEntry::new(Category::Auditory, 18.0, false),
            PredictionEntry::new(Category::Kinesthetic, 12.0, false),
            PredictionEntry::new(Category::ReadingWriting, 8.0, false),
        ];
        synthesize(&entries, 0)
    }

    #[test]
    fn test_vertical_mapping_extremes() {
        let dims = ChartDimensions {
            width: 760.0,
            height: 260.0,
            padding: Padding {
                top: 24.0,
                right: 24.0,
                bottom: 32.0,
                left: 48.0,
            },
        };
        let scale = ChartScale {
            min: 20.0,
            max: 80.0,
            phase_count: PHASE_COUNT,
            dims,
        };
        assert_eq!(scale.y(80.0), 24.0);
        assert_eq!(scale.y(20.0), 228.0);
    }

    #[test]
    fn test_horizontal_mapping_spans_plot() {
        let scale = ChartScale::fit(&flat_series(10), ChartDimensions::default());
        assert_eq!(scale.x(0), 48.0);
        assert_eq!(scale.x(PHASE_COUNT - 1), 736.0);
    }

    #[test]
    fn test_flat_data_is_finite() {
        let model = render(&flat_series(25), 0, &ChartDimensions::default());
        assert_eq!(model.global_min, 25.0);
        assert_eq!(model.global_max, 25.0);
        for path in &model.series {
            for m in &path.markers {
                assert!(m.cx.is_finite() && m.cy.is_finite());
                assert_eq!(m.cy, 24.0);
            }
        }
        let ticks: Vec<&str> = model.y_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(ticks, vec!["25"; 5]);
    }

    #[test]
    fn test_empty_series_is_finite() {
        let model = render(&[], 0, &ChartDimensions::default());
        assert!(model.series.is_empty());
        assert!(model.x_labels.is_empty());
        assert_eq!(model.gridlines.len(), 5);
        assert!(model.gridlines.iter().all(|g| g.y.is_finite()));
        assert_eq!(model.top_category, None);
    }

    #[test]
    fn test_gridlines_and_ticks() {
        let model = render(&sample_series(), 0, &ChartDimensions::default());
        let ys: Vec<f64> = model.gridlines.iter().map(|g| g.y).collect();
        assert_eq!(ys, vec![24.0, 75.0, 126.0, 177.0, 228.0]);

        // values run from 8 (R final) up to 62 (V final)
        assert_eq!(model.global_min, 8.0);
        assert_eq!(model.global_max, 62.0);
        let ticks: Vec<&str> = model.y_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(ticks, vec!["62", "49", "35", "22", "8"]);
        assert_eq!(model.y_labels[0].x, 12.0);
        assert_eq!(model.y_labels[0].y, 28.0);
    }

    #[test]
    fn test_phase_labels() {
        let model = render(&sample_series(), 0, &ChartDimensions::default());
        assert_eq!(model.x_labels.len(), PHASE_COUNT);
        assert_eq!(model.x_labels[0].text, "Initial");
        assert_eq!(model.x_labels[6].text, "Final Result");
        assert!(model.x_labels.iter().all(|l| l.y == 254.0));
    }

    #[test]
    fn test_top_series_emphasized() {
        let model = render(&sample_series(), 0, &ChartDimensions::default());
        assert_eq!(model.top_category, Some(Category::Visual));
        assert!(model.series[0].emphasized);
        assert_eq!(model.series[0].stroke_width, 2.6);
        assert_eq!(model.series[0].stroke_opacity, 1.0);
        assert_eq!(model.series[0].markers[0].r, 3.5);
        for path in &model.series[1..] {
            assert!(!path.emphasized);
            assert_eq!(path.stroke_width, 1.6);
            assert_eq!(path.stroke_opacity, 0.6);
            assert_eq!(path.markers[0].r, 2.8);
        }
    }

    #[test]
    fn test_path_data_format() {
        let model = render(&sample_series(), 0, &ChartDimensions::default());
        let d = &model.series[0].d;
        assert!(d.starts_with("M 48.00 "));
        assert_eq!(d.matches('L').count(), PHASE_COUNT - 1);
        // V ends at the global max
        assert!(d.ends_with("L 736.00 24.00"));
    }

    #[test]
    fn test_legend_and_caption() {
        let model = render(&sample_series(), 0, &ChartDimensions::default());
        assert_eq!(model.legend.len(), CATEGORY_COUNT);
        assert_eq!(model.legend[3].label, "Reading/Writing");
        assert_eq!(model.legend[3].match_percent, Some(8));
        assert!(model.caption.contains("(Visual)"));
        assert!(model.caption.contains("62%"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let dims = ChartDimensions::default();
        let first = render(&sample_series(), 0, &dims);
        let second = render(&sample_series(), 0, &dims);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_markers_stay_inside_plot(
            finals in proptest::array::uniform4(0.0f64..=100.0),
            top in 0usize..CATEGORY_COUNT,
        ) {
            let entries = Category::ALL.map(|c| PredictionEntry::new(c, finals[c.index()], c.index() == top));
            let dims = ChartDimensions::default();
            let model = render(&synthesize(&entries, top), top, &dims);
            for path in &model.series {
                for m in &path.markers {
                    prop_assert!(m.cx >= dims.padding.left - 1e-9);
                    prop_assert!(m.cx <= dims.width - dims.padding.right + 1e-9);
                    prop_assert!(m.cy >= dims.padding.top - 1e-9);
                    prop_assert!(m.cy <= dims.height - dims.padding.bottom + 1e-9);
                }
            }
        }
    }
}
