//! Common Types and Constants
//!
//! Shared data structures used across the synthesis, chart and bar modules,
//! plus the static configuration tables (phases, palette, stroke styles).

use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ==================== Constants ====================

/// Number of learning-style categories scored by the predictor
pub const CATEGORY_COUNT: usize = 4;

/// Number of analysis phases along the horizontal axis
pub const PHASE_COUNT: usize = 7;

/// Lowest start value for the top category's series
pub const TOP_START_FLOOR: f64 = 20.0;

/// Distance below the final value at which the top category's series starts
pub const TOP_START_DROP: f64 = 25.0;

/// Highest start value for any non-top category's series
pub const OTHER_START_CAP: f64 = 35.0;

/// Distance above the final value at which non-top series start
pub const OTHER_START_RISE: f64 = 10.0;

/// Percentage assigned to every category when the result set is malformed
pub const UNIFORM_FALLBACK_PERCENT: f64 = 25.0;

/// Percentage bounds
pub const MIN_PERCENT: f64 = 0.0;
pub const MAX_PERCENT: f64 = 100.0;

/// Fractional positions of the horizontal gridlines, top to bottom
pub const GRID_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

// ==================== Category ====================

/// Learning-style category, in the fixed order the predictor reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Visual,
    Auditory,
    Kinesthetic,
    ReadingWriting,
}

/// Category palette, indexed like [`Category::ALL`]
pub const CATEGORY_COLORS: [&str; CATEGORY_COUNT] = ["#f97316", "#84cc16", "#06b6d4", "#a78bfa"];

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Visual,
        Category::Auditory,
        Category::Kinesthetic,
        Category::ReadingWriting,
    ];

    pub fn index(self) -> usize {
        match self {
            Category::Visual => 0,
            Category::Auditory => 1,
            Category::Kinesthetic => 2,
            Category::ReadingWriting => 3,
        }
    }

    /// Category at a fixed position; `None` past the last category
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Category for the numeric class id emitted by the model
    pub fn from_class_id(id: i64) -> Option<Self> {
        usize::try_from(id).ok().and_then(Self::from_index)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Visual => "Visual",
            Category::Auditory => "Auditory",
            Category::Kinesthetic => "Kinesthetic",
            Category::ReadingWriting => "Reading/Writing",
        }
    }

    pub fn color(self) -> &'static str {
        CATEGORY_COLORS[self.index()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown learning style: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "visual" | "v" => Ok(Category::Visual),
            "auditory" | "aural" | "a" => Ok(Category::Auditory),
            "kinesthetic" | "kinaesthetic" | "k" => Ok(Category::Kinesthetic),
            "readingwriting" | "reading" | "readwrite" | "r" => Ok(Category::ReadingWriting),
            _ => match normalized.parse::<i64>().ok().and_then(Category::from_class_id) {
                Some(category) => Ok(category),
                None => Err(UnknownCategory(s.to_string())),
            },
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Id(i64),
    Label(String),
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match CategoryRepr::deserialize(deserializer)? {
            CategoryRepr::Id(id) => Category::from_class_id(id).ok_or_else(|| {
                serde::de::Error::custom(format!("learning style id out of range: {id}"))
            }),
            CategoryRepr::Label(label) => label.parse().map_err(serde::de::Error::custom),
        }
    }
}

// ==================== Analysis Phases ====================

/// Stage along the synthetic progression's horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisPhase {
    Initial,
    StudyHabits,
    Attendance,
    Assignments,
    Engagement,
    Performance,
    FinalResult,
}

impl AnalysisPhase {
    pub const ALL: [AnalysisPhase; PHASE_COUNT] = [
        AnalysisPhase::Initial,
        AnalysisPhase::StudyHabits,
        AnalysisPhase::Attendance,
        AnalysisPhase::Assignments,
        AnalysisPhase::Engagement,
        AnalysisPhase::Performance,
        AnalysisPhase::FinalResult,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisPhase::Initial => "Initial",
            AnalysisPhase::StudyHabits => "Study Habits",
            AnalysisPhase::Attendance => "Attendance",
            AnalysisPhase::Assignments => "Assignments",
            AnalysisPhase::Engagement => "Engagement",
            AnalysisPhase::Performance => "Performance",
            AnalysisPhase::FinalResult => "Final Result",
        }
    }
}

// ==================== Prediction Input ====================

/// One scored category as returned by the prediction service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionEntry {
    #[serde(rename = "style", alias = "category")]
    pub category: Category,
    /// Probability expressed in percent, expected in [0, 100]
    pub percentage: f64,
    /// Whether the service marked this category as the best match
    #[serde(rename = "is_predicted", alias = "isTop", alias = "is_top", default)]
    pub is_top: bool,
}

impl PredictionEntry {
    pub fn new(category: Category, percentage: f64, is_top: bool) -> Self {
        Self {
            category,
            percentage,
            is_top,
        }
    }
}

/// Complete result handed over by the prediction service.
///
/// Deserializing never fails on a bad entry. Entries with an unknown style,
/// a missing or non-numeric percentage, or an unexpected shape are left out
/// of `predictions` and counted in `rejected_entries`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPredictionResult")]
pub struct PredictionResult {
    #[serde(rename = "predicted_style")]
    pub predicted_category: Option<Category>,
    pub predictions: Vec<PredictionEntry>,
    #[serde(skip)]
    pub rejected_entries: usize,
}

impl PredictionResult {
    pub fn new(predicted_category: Option<Category>, predictions: Vec<PredictionEntry>) -> Self {
        Self {
            predicted_category,
            predictions,
            rejected_entries: 0,
        }
    }

    /// Nothing was supplied at all, as in the legacy class-id response
    pub fn has_no_entries(&self) -> bool {
        self.predictions.is_empty() && self.rejected_entries == 0
    }
}

/// Keeps a value only when it parses as `T`
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Parsed(T),
    Rejected(IgnoredAny),
}

impl<T> Lenient<T> {
    fn ok(self) -> Option<T> {
        match self {
            Lenient::Parsed(value) => Some(value),
            Lenient::Rejected(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "style", alias = "category", default)]
    category: Option<Lenient<Category>>,
    #[serde(default)]
    percentage: Option<Lenient<f64>>,
    #[serde(rename = "is_predicted", alias = "isTop", alias = "is_top", default)]
    is_top: Option<Lenient<bool>>,
}

impl RawEntry {
    fn into_entry(self) -> Option<PredictionEntry> {
        let category = self.category.and_then(Lenient::ok)?;
        let percentage = self.percentage.and_then(Lenient::ok)?;
        let is_top = self.is_top.and_then(Lenient::ok).unwrap_or(false);
        Some(PredictionEntry::new(category, percentage, is_top))
    }
}

#[derive(Deserialize)]
struct RawPredictionResult {
    #[serde(
        rename = "predicted_style",
        alias = "predictedCategory",
        alias = "predictedStyle",
        default
    )]
    predicted_category: Option<Lenient<Category>>,
    #[serde(default)]
    predictions: Option<Lenient<Vec<Lenient<RawEntry>>>>,
}

impl From<RawPredictionResult> for PredictionResult {
    fn from(raw: RawPredictionResult) -> Self {
        let mut predictions = Vec::new();
        let mut rejected_entries = 0;

        match raw.predictions {
            None => {}
            Some(Lenient::Parsed(items)) => {
                for item in items {
                    match item.ok().and_then(RawEntry::into_entry) {
                        Some(entry) => predictions.push(entry),
                        None => rejected_entries += 1,
                    }
                }
            }
            // `predictions` was not a list at all
            Some(Lenient::Rejected(_)) => rejected_entries += 1,
        }

        Self {
            predicted_category: raw.predicted_category.and_then(Lenient::ok),
            predictions,
            rejected_entries,
        }
    }
}

/// Which category is emphasized, and how that was decided
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "category", rename_all = "camelCase")]
pub enum TopSelection {
    /// An entry carried the best-match flag
    Flagged(Category),
    /// No entry was flagged; the result named the predicted category
    Named(Category),
    /// Nothing identified a winner; the first category stands in
    Defaulted,
}

impl TopSelection {
    pub fn category(self) -> Category {
        match self {
            TopSelection::Flagged(category) | TopSelection::Named(category) => category,
            TopSelection::Defaulted => Category::ALL[0],
        }
    }

    pub fn index(self) -> usize {
        self.category().index()
    }

    pub fn is_defaulted(self) -> bool {
        matches!(self, TopSelection::Defaulted)
    }
}

// ==================== Series ====================

/// One synthesized value for one category at one phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub phase_index: usize,
    pub value: i32,
}

/// Ordered synthetic values for one category across all phases
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Series {
    pub category: Category,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn from_values(category: Category, values: impl IntoIterator<Item = i32>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(phase_index, value)| SeriesPoint { phase_index, value })
            .collect();
        Self { category, points }
    }

    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn first_value(&self) -> Option<i32> {
        self.points.first().map(|p| p.value)
    }

    pub fn last_value(&self) -> Option<i32> {
        self.points.last().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ==================== Chart Configuration ====================

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 24.0,
            right: 24.0,
            bottom: 32.0,
            left: 48.0,
        }
    }
}

/// Fixed coordinate space the chart is laid out in
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub padding: Padding,
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self {
            width: 760.0,
            height: 260.0,
            padding: Padding::default(),
        }
    }
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Caller-supplied size. Anything non-positive or non-finite, or too
    /// small to leave a plot area, keeps the default canvas.
    pub fn sanitized(width: Option<f64>, height: Option<f64>) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<f64>, fallback: f64| {
            value
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(fallback)
        };
        let dims = Self::new(pick(width, defaults.width), pick(height, defaults.height));
        if dims.plot_width() <= 0.0 || dims.plot_height() <= 0.0 {
            return defaults;
        }
        dims
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }
}

/// Stroke and marker weights for one emphasis level
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub width: f64,
    pub opacity: f64,
    pub marker_radius: f64,
}

/// Presentation constants shared by every render
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartStyle {
    pub top: StrokeStyle,
    pub other: StrokeStyle,
    pub marker_stroke: &'static str,
    pub marker_stroke_width: f64,
    pub grid_color: &'static str,
    pub grid_width: f64,
    pub label_color: &'static str,
    pub x_label_font_size: f64,
    pub y_label_font_size: f64,
    /// Left edge of the y tick labels
    pub y_label_x: f64,
    /// Baseline offset below each gridline for its y tick label
    pub y_label_baseline: f64,
    /// Distance of the phase labels' baseline above the bottom edge
    pub x_label_inset: f64,
}

pub const CHART_STYLE: ChartStyle = ChartStyle {
    top: StrokeStyle {
        width: 2.6,
        opacity: 1.0,
        marker_radius: 3.5,
    },
    other: StrokeStyle {
        width: 1.6,
        opacity: 0.6,
        marker_radius: 2.8,
    },
    marker_stroke: "#0f172a",
    marker_stroke_width: 0.6,
    grid_color: "#334155",
    grid_width: 0.5,
    label_color: "#94a3b8",
    x_label_font_size: 10.0,
    y_label_font_size: 11.0,
    y_label_x: 12.0,
    y_label_baseline: 4.0,
    x_label_inset: 6.0,
};

impl Default for ChartStyle {
    fn default() -> Self {
        CHART_STYLE
    }
}
