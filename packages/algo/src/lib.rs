//! # style-trend-algo - 学习风格趋势核心算法库
//!
//! Pure Rust core behind the learning-style result view:
//!
//! - **Trend Synthesizer** - fabricates a seven-phase progression per category
//!   from its final percentage alone
//! - **Chart Renderer** - shared-axis scaling, gridlines, tick labels, paths and
//!   markers in a fixed coordinate space
//! - **Ranked Bars** - per-category bars in service order
//!
//! ## 模块结构
//!
//! - [`types`] - 公共类型和常量 (categories, phases, palette, clamp constants)
//! - [`sanitize`] - 输入清洗 (uniform fallback, top category resolution)
//! - [`trend`] - 趋势合成
//! - [`chart`] - 图表几何与 SVG 输出
//! - [`bars`] - 排名条形图
//!
//! ## 使用示例
//!
//! ```rust
//! use style_trend_algo::{render_trend, synthesize_prediction, ChartDimensions, PredictionResult};
//!
//! let result: PredictionResult = serde_json::from_str(
//!     r#"{"predicted_style":"Visual","predictions":[
//!         {"style":"Visual","percentage":62,"is_predicted":true},
//!         {"style":"Auditory","percentage":18},
//!         {"style":"Kinesthetic","percentage":12},
//!         {"style":"Reading/Writing","percentage":8}]}"#,
//! ).unwrap();
//!
//! let trend = synthesize_prediction(&result);
//! let model = render_trend(&trend, &ChartDimensions::default());
//! assert_eq!(model.series.len(), 4);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod bars;
pub mod chart;
pub mod sanitize;
pub mod trend;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

/// 重新导出输入清洗
pub use sanitize::{prepare, prepare_result, resolve_top, PreparedPrediction};

/// 重新导出趋势合成
pub use trend::{synthesize, synthesize_prediction, SynthesizedTrend};

/// 重新导出图表渲染
pub use chart::svg::{render_svg, write_svg};
pub use chart::{render, render_trend, ChartScale, RenderModel};

/// 重新导出排名条形图
pub use bars::{ranked_bars, RankedBar};
