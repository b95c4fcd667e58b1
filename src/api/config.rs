use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{Accessor, DEFAULT_BIN_COUNT, Viewport};
use crate::error::{ChartError, ChartResult};

/// Outer chart margins in pixels. Marginal histograms live inside the top
/// and right margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 90.0,
            right: 90.0,
            bottom: 50.0,
            left: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: Margins,
    pub histogram_margin: f64,
    pub histogram_height: f64,
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            margin: Margins::default(),
            histogram_margin: default_histogram_margin(),
            histogram_height: default_histogram_height(),
        }
    }
}

impl ChartDimensions {
    /// Plot area inside the margins; scales, cells and plot pointer
    /// positions all use this frame.
    #[must_use]
    pub fn bounded(self) -> Viewport {
        Viewport::new(
            self.width - self.margin.left - self.margin.right,
            self.height - self.margin.top - self.margin.bottom,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendDimensions {
    pub width: f64,
    pub height: f64,
    /// Highlight bar width as a fraction of the legend width.
    pub highlight_bar_width_ratio: f64,
}

impl Default for LegendDimensions {
    fn default() -> Self {
        Self {
            width: 250.0,
            height: 26.0,
            highlight_bar_width_ratio: default_highlight_bar_width_ratio(),
        }
    }
}

impl LegendDimensions {
    #[must_use]
    pub fn bar_width(self) -> f64 {
        self.width * self.highlight_bar_width_ratio
    }
}

/// How far hover guide segments extend from the hovered point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideExtent {
    /// Stop at the marginal histogram edge facing the plot.
    NearEdge,
    /// Run through the histogram band to its outer edge.
    FarEdge,
}

/// Session configuration, fixed once the model is built.
///
/// Every field has a serde default so partial JSON documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub dimensions: ChartDimensions,
    #[serde(default)]
    pub legend: LegendDimensions,
    #[serde(default = "default_x_accessor")]
    pub x_accessor: Accessor,
    #[serde(default = "default_y_accessor")]
    pub y_accessor: Accessor,
    /// `strftime` format of the `datetime` column.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_color_reference_year")]
    pub color_reference_year: i32,
    #[serde(default = "default_histogram_bin_count")]
    pub histogram_bin_count: usize,
    #[serde(default = "default_true")]
    pub with_histograms: bool,
    #[serde(default = "default_guide_extent")]
    pub guide_extent: GuideExtent,
    #[serde(default = "default_tooltip_date_format")]
    pub tooltip_date_format: String,
    #[serde(default = "default_legend_date_format")]
    pub legend_date_format: String,
    #[serde(default = "default_temperature_decimals")]
    pub temperature_decimals: usize,
    #[serde(default = "default_axis_tick_count")]
    pub axis_tick_count: usize,
    #[serde(default = "default_legend_gradient_stops")]
    pub legend_gradient_stops: usize,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(default = "default_hover_marker_radius")]
    pub hover_marker_radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dimensions: ChartDimensions::default(),
            legend: LegendDimensions::default(),
            x_accessor: default_x_accessor(),
            y_accessor: default_y_accessor(),
            date_format: default_date_format(),
            color_reference_year: default_color_reference_year(),
            histogram_bin_count: default_histogram_bin_count(),
            with_histograms: true,
            guide_extent: default_guide_extent(),
            tooltip_date_format: default_tooltip_date_format(),
            legend_date_format: default_legend_date_format(),
            temperature_decimals: default_temperature_decimals(),
            axis_tick_count: default_axis_tick_count(),
            legend_gradient_stops: default_legend_gradient_stops(),
            point_radius: default_point_radius(),
            hover_marker_radius: default_hover_marker_radius(),
        }
    }
}

impl ChartConfig {
    /// Default config with a square chart of the given outer size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let mut config = Self::default();
        config.dimensions.width = width;
        config.dimensions.height = height;
        config
    }

    /// Default margins around a plot area of exactly `plot_width` by
    /// `plot_height` pixels.
    #[must_use]
    pub fn for_plot(plot_width: f64, plot_height: f64) -> Self {
        let mut config = Self::default();
        let margin = config.dimensions.margin;
        config.dimensions.width = plot_width + margin.left + margin.right;
        config.dimensions.height = plot_height + margin.top + margin.bottom;
        config
    }

    #[must_use]
    pub fn with_margins(mut self, margin: Margins) -> Self {
        self.dimensions.margin = margin;
        self
    }

    #[must_use]
    pub fn with_accessors(mut self, x_accessor: Accessor, y_accessor: Accessor) -> Self {
        self.x_accessor = x_accessor;
        self.y_accessor = y_accessor;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    #[must_use]
    pub fn with_histograms(mut self, enabled: bool) -> Self {
        self.with_histograms = enabled;
        self
    }

    #[must_use]
    pub fn with_guide_extent(mut self, guide_extent: GuideExtent) -> Self {
        self.guide_extent = guide_extent;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendDimensions) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn bounded(&self) -> Viewport {
        self.dimensions.bounded()
    }

    pub fn validate(&self) -> ChartResult<()> {
        Viewport::new(self.dimensions.width, self.dimensions.height).validate()?;
        self.bounded().validate()?;

        let margin = self.dimensions.margin;
        for (name, value) in [
            ("margin.top", margin.top),
            ("margin.right", margin.right),
            ("margin.bottom", margin.bottom),
            ("margin.left", margin.left),
            ("histogram_margin", self.dimensions.histogram_margin),
            ("histogram_height", self.dimensions.histogram_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        Viewport::new(self.legend.width, self.legend.height).validate()?;
        let bar_width = self.legend.bar_width();
        if !bar_width.is_finite() || bar_width <= 0.0 || bar_width > self.legend.width {
            return Err(ChartError::InvalidConfig(
                "legend highlight bar must be wider than 0 and no wider than the legend"
                    .to_owned(),
            ));
        }

        if self.histogram_bin_count == 0 {
            return Err(ChartError::InvalidConfig(
                "histogram bin count must be > 0".to_owned(),
            ));
        }
        for (name, radius) in [
            ("point_radius", self.point_radius),
            ("hover_marker_radius", self.hover_marker_radius),
        ] {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }

        for (name, format) in [
            ("date_format", self.date_format.as_str()),
            ("tooltip_date_format", self.tooltip_date_format.as_str()),
            ("legend_date_format", self.legend_date_format.as_str()),
        ] {
            validate_strftime(name, format)?;
        }

        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }
}

fn validate_strftime(name: &str, format: &str) -> ChartResult<()> {
    if format.is_empty() {
        return Err(ChartError::InvalidConfig(format!("`{name}` must not be empty")));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidConfig(format!(
            "`{name}` is not a valid strftime format: `{format}`"
        )));
    }
    Ok(())
}

fn default_histogram_margin() -> f64 {
    10.0
}

fn default_histogram_height() -> f64 {
    70.0
}

fn default_highlight_bar_width_ratio() -> f64 {
    0.05
}

fn default_x_accessor() -> Accessor {
    Accessor::TempMin
}

fn default_y_accessor() -> Accessor {
    Accessor::TempMax
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_owned()
}

fn default_color_reference_year() -> i32 {
    2000
}

fn default_histogram_bin_count() -> usize {
    DEFAULT_BIN_COUNT
}

fn default_true() -> bool {
    true
}

fn default_guide_extent() -> GuideExtent {
    GuideExtent::NearEdge
}

fn default_tooltip_date_format() -> String {
    "%A, %B %-d, %Y".to_owned()
}

fn default_legend_date_format() -> String {
    "%b %d".to_owned()
}

fn default_temperature_decimals() -> usize {
    1
}

fn default_axis_tick_count() -> usize {
    4
}

fn default_legend_gradient_stops() -> usize {
    10
}

fn default_point_radius() -> f64 {
    4.0
}

fn default_hover_marker_radius() -> f64 {
    7.0
}
