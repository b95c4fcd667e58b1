use serde::{Deserialize, Serialize};

use crate::core::curve::{PathCommand, basis_curve};
use crate::core::types::{Accessor, DataPoint, Point};
use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Default number of equal-width bins per marginal histogram.
pub const DEFAULT_BIN_COUNT: usize = 20;

/// Half-open interval `[lower_bound, upper_bound)` with its sample count.
/// The last bin of a histogram is closed on the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
}

impl HistogramBin {
    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.lower_bound + self.upper_bound) * 0.5
    }
}

/// Splits `domain` into `bin_count` equal-width bins and counts the finite
/// values falling inside it.
///
/// Values outside the domain are ignored. A zero-width domain produces
/// `bin_count` zero-width bins with every in-domain value counted in the first.
pub fn compute_bins(
    values: impl IntoIterator<Item = f64>,
    domain: (f64, f64),
    bin_count: usize,
) -> ChartResult<Vec<HistogramBin>> {
    if bin_count == 0 {
        return Err(ChartError::InvalidConfig(
            "histogram bin count must be > 0".to_owned(),
        ));
    }
    if !domain.0.is_finite() || !domain.1.is_finite() {
        return Err(ChartError::InvalidData(
            "histogram domain must be finite".to_owned(),
        ));
    }

    let (low, high) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };
    let span = high - low;
    let width = if span > 0.0 { span / bin_count as f64 } else { 0.0 };

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower_bound: low + width * i as f64,
            upper_bound: if i + 1 == bin_count {
                high
            } else {
                low + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        if !value.is_finite() || value < low || value > high {
            continue;
        }
        let index = if width > 0.0 {
            bin_index(&bins, value, ((value - low) / width) as usize)
        } else {
            0
        };
        bins[index].count += 1;
    }

    Ok(bins)
}

/// Corrects the arithmetic estimate so boundary values follow the bins'
/// half-open bounds exactly.
fn bin_index(bins: &[HistogramBin], value: f64, estimate: usize) -> usize {
    let last = bins.len() - 1;
    let mut index = estimate.min(last);
    while index > 0 && value < bins[index].lower_bound {
        index -= 1;
    }
    while index < last && value >= bins[index].upper_bound {
        index += 1;
    }
    index
}

/// Exact bin counts plus the count axis used to draw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    accessor: Accessor,
    bins: Vec<HistogramBin>,
    count_scale: LinearScale,
    band_height: f64,
}

impl Histogram {
    /// Bins `accessor` values over `domain`. The count scale maps
    /// `[0, max count]` onto `[band_height, 0]`, so taller bars point toward
    /// the band's far edge; with no samples it collapses to `[0, 0]` and every
    /// count maps to the baseline.
    pub fn build(
        points: &[DataPoint],
        accessor: Accessor,
        domain: (f64, f64),
        bin_count: usize,
        band_height: f64,
    ) -> ChartResult<Self> {
        if !band_height.is_finite() || band_height < 0.0 {
            return Err(ChartError::InvalidGeometry {
                width: 0.0,
                height: band_height,
            });
        }

        let bins = compute_bins(
            points.iter().map(|point| accessor.value(point)),
            domain,
            bin_count,
        )?;
        let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(0);
        let count_scale = LinearScale::new((0.0, max_count as f64), (band_height, 0.0));

        Ok(Self {
            accessor,
            bins,
            count_scale,
            band_height,
        })
    }

    #[must_use]
    pub fn accessor(&self) -> Accessor {
        self.accessor
    }

    #[must_use]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    #[must_use]
    pub fn count_scale(&self) -> LinearScale {
        self.count_scale
    }

    #[must_use]
    pub fn band_height(&self) -> f64 {
        self.band_height
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Bin midpoints in band-local pixels: `x` along `position_scale`,
    /// `y` from the count scale.
    #[must_use]
    pub fn midpoint_vertices(&self, position_scale: LinearScale) -> Vec<Point> {
        self.bins
            .iter()
            .map(|bin| {
                Point::new(
                    position_scale.map(bin.midpoint()),
                    self.count_scale.map(bin.count as f64),
                )
            })
            .collect()
    }

    /// Closed, smoothed area between the basis-spline through the bin
    /// midpoints and the band baseline (`y = band_height`).
    #[must_use]
    pub fn silhouette(&self, position_scale: LinearScale) -> Vec<PathCommand> {
        let vertices = self.midpoint_vertices(position_scale);
        let (Some(first), Some(last)) = (vertices.first().copied(), vertices.last().copied())
        else {
            return Vec::new();
        };

        let mut commands = basis_curve(&vertices);
        commands.push(PathCommand::LineTo(Point::new(last.x, self.band_height)));
        commands.push(PathCommand::LineTo(Point::new(first.x, self.band_height)));
        commands.push(PathCommand::Close);
        commands
    }
}

/// Side of the plot a marginal histogram is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistogramAxis {
    /// Above the plot, binning the x accessor.
    Top,
    /// Right of the plot, binning the y accessor.
    Right,
}

/// Where the band-local histogram frame sits relative to the plot origin.
///
/// The renderer translates by `offset` and then rotates by
/// `rotation_degrees` clockwise about that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramPlacement {
    pub offset: Point,
    pub rotation_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalHistogram {
    pub axis: HistogramAxis,
    pub histogram: Histogram,
    pub placement: HistogramPlacement,
    /// Position axis of the band-local frame.
    pub position_scale: LinearScale,
}

impl MarginalHistogram {
    /// Top band: `x` follows the plot's x scale, the baseline touches the plot
    /// `histogram_margin` pixels above it.
    pub fn top(
        points: &[DataPoint],
        accessor: Accessor,
        x_scale: LinearScale,
        bin_count: usize,
        histogram_margin: f64,
        histogram_height: f64,
    ) -> ChartResult<Self> {
        let histogram = Histogram::build(
            points,
            accessor,
            x_scale.domain(),
            bin_count,
            histogram_height,
        )?;
        Ok(Self {
            axis: HistogramAxis::Top,
            histogram,
            placement: HistogramPlacement {
                offset: Point::new(0.0, -histogram_margin - histogram_height),
                rotation_degrees: 0.0,
            },
            position_scale: x_scale,
        })
    }

    /// Right band: built in the same upright local frame as the top band and
    /// rotated a quarter turn clockwise so the baseline faces the plot.
    ///
    /// Local `x` reuses the y scale unchanged, so after rotation each bin sits
    /// level with the plot rows it counts.
    pub fn right(
        points: &[DataPoint],
        accessor: Accessor,
        y_scale: LinearScale,
        plot_width: f64,
        bin_count: usize,
        histogram_margin: f64,
        histogram_height: f64,
    ) -> ChartResult<Self> {
        let histogram = Histogram::build(
            points,
            accessor,
            y_scale.domain(),
            bin_count,
            histogram_height,
        )?;
        Ok(Self {
            axis: HistogramAxis::Right,
            histogram,
            placement: HistogramPlacement {
                offset: Point::new(plot_width + histogram_margin + histogram_height, 0.0),
                rotation_degrees: 90.0,
            },
            position_scale: y_scale,
        })
    }

    #[must_use]
    pub fn silhouette(&self) -> Vec<PathCommand> {
        self.histogram.silhouette(self.position_scale)
    }

    /// Maps a band-local point into plot coordinates.
    #[must_use]
    pub fn to_plot(&self, local: Point) -> Point {
        let (sin, cos) = self.placement.rotation_degrees.to_radians().sin_cos();
        Point::new(
            self.placement.offset.x + local.x * cos - local.y * sin,
            self.placement.offset.y + local.x * sin + local.y * cos,
        )
    }

    /// Coordinate of the band edge facing the plot: `y` for the top band,
    /// `x` for the right band.
    #[must_use]
    pub fn near_edge(&self) -> f64 {
        match self.axis {
            HistogramAxis::Top => self.placement.offset.y + self.histogram.band_height(),
            HistogramAxis::Right => self.placement.offset.x - self.histogram.band_height(),
        }
    }

    /// Coordinate of the band edge away from the plot.
    #[must_use]
    pub fn far_edge(&self) -> f64 {
        match self.axis {
            HistogramAxis::Top => self.placement.offset.y,
            HistogramAxis::Right => self.placement.offset.x,
        }
    }
}
