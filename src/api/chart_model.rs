use chrono::NaiveDate;
use tracing::debug;

use crate::core::{
    DataPoint, DateScale, LinearScale, MarginalHistogram, PlotScales, Point, SpatialPartition,
    Viewport,
};
use crate::error::ChartResult;

use super::ChartConfig;

/// Everything derived from `(data, config)` at load time.
///
/// Immutable after `build`; pointer handlers borrow it and keep their own
/// small state next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    config: ChartConfig,
    bounds: Viewport,
    points: Vec<DataPoint>,
    scales: PlotScales,
    partition: SpatialPartition,
    top_histogram: Option<MarginalHistogram>,
    right_histogram: Option<MarginalHistogram>,
    legend_scale: DateScale,
}

impl ChartModel {
    /// Builds scales, the spatial partition and marginal histograms.
    ///
    /// Only configuration problems fail; an empty dataset produces degenerate
    /// scales, an empty partition and all-zero histograms.
    pub fn build(points: Vec<DataPoint>, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let bounds = config.bounded();

        let scales = PlotScales::build(
            &points,
            config.x_accessor,
            config.y_accessor,
            config.color_reference_year,
            bounds,
        );

        let partition = SpatialPartition::from_points(
            &points,
            config.x_accessor,
            config.y_accessor,
            &scales,
            bounds,
        )?;

        let (top_histogram, right_histogram) = if config.with_histograms {
            let dims = config.dimensions;
            let top = MarginalHistogram::top(
                &points,
                config.x_accessor,
                scales.x,
                config.histogram_bin_count,
                dims.histogram_margin,
                dims.histogram_height,
            )?;
            let right = MarginalHistogram::right(
                &points,
                config.y_accessor,
                scales.y,
                bounds.width,
                config.histogram_bin_count,
                dims.histogram_margin,
                dims.histogram_height,
            )?;
            (Some(top), Some(right))
        } else {
            (None, None)
        };

        let legend_scale = scales.legend_date_scale(config.legend.width);

        debug!(
            points = points.len(),
            x_domain = ?scales.x.domain(),
            extent = ?scales.temperature_extent,
            histograms = config.with_histograms,
            "chart model built"
        );

        Ok(Self {
            config,
            bounds,
            points,
            scales,
            partition,
            top_histogram,
            right_histogram,
            legend_scale,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Plot area size; the frame for scales, cells and plot pointer events.
    #[must_use]
    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn scales(&self) -> &PlotScales {
        &self.scales
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.scales.x
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.scales.y
    }

    #[must_use]
    pub fn partition(&self) -> &SpatialPartition {
        &self.partition
    }

    #[must_use]
    pub fn top_histogram(&self) -> Option<&MarginalHistogram> {
        self.top_histogram.as_ref()
    }

    #[must_use]
    pub fn right_histogram(&self) -> Option<&MarginalHistogram> {
        self.right_histogram.as_ref()
    }

    #[must_use]
    pub fn legend_scale(&self) -> DateScale {
        self.legend_scale
    }

    /// Plot-space position of the point at `index`.
    #[must_use]
    pub fn projected(&self, index: usize) -> Option<Point> {
        self.partition.site(index)
    }

    /// Indices of points whose date, moved onto the reference year, lies in
    /// `[min_date, max_date]`.
    #[must_use]
    pub fn points_in_date_range(&self, min_date: NaiveDate, max_date: NaiveDate) -> Vec<usize> {
        let color = self.scales.color;
        self.points
            .iter()
            .enumerate()
            .filter(|(_, point)| {
                let day = color.normalize(point.date);
                day >= min_date && day <= max_date
            })
            .map(|(index, _)| index)
            .collect()
    }
}
