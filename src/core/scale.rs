use serde::{Deserialize, Serialize};

use crate::core::types::{Accessor, DataPoint, Viewport};
use crate::core::{CyclicColorScale, DateScale};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Default tick density used when rounding a domain outward.
pub const DEFAULT_NICE_COUNT: usize = 10;

/// Continuous linear mapping from a domain interval onto a range interval.
///
/// Either interval may be reversed (the y axis maps onto `[height, 0]`).
/// A zero-width domain is accepted: every value maps to the range start and
/// `invert` returns the domain start, so empty or constant datasets never
/// divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.domain_end - self.domain_start).is_normal()
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if !span.is_normal() {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if !span.is_normal() || self.is_degenerate() {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Rounds the domain outward to multiples of a 1/2/5 tick step.
    ///
    /// The step is recomputed against the widened domain until it settles, so
    /// the result is stable under repeated calls. Degenerate domains are
    /// returned unchanged.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        if self.is_degenerate() || !self.domain_start.is_finite() || !self.domain_end.is_finite()
        {
            return self;
        }

        let reversed = self.domain_end < self.domain_start;
        let (mut start, mut stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let mut previous_step: Option<f64> = None;
        for _ in 0..10 {
            let Some((_, _, step)) = tick_spec(start, stop, count as f64) else {
                break;
            };
            if previous_step == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous_step = Some(step);
        }

        let domain = if reversed { (stop, start) } else { (start, stop) };
        Self::new(domain, self.range())
    }

    /// Returns roughly `count` round values inside the domain, ascending in
    /// domain order.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count == 0 || !self.domain_start.is_finite() || !self.domain_end.is_finite() {
            return Vec::new();
        }
        if self.domain_start == self.domain_end {
            return vec![self.domain_start];
        }

        let reversed = self.domain_end < self.domain_start;
        let (start, stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let Some((first, last, increment)) = tick_spec(start, stop, count as f64) else {
            return Vec::new();
        };
        if last < first {
            return Vec::new();
        }

        let mut ticks: Vec<f64> = (first..=last)
            .map(|i| {
                let i = i as f64;
                if increment < 0.0 {
                    i / -increment
                } else {
                    i * increment
                }
            })
            .collect();
        if reversed {
            ticks.reverse();
        }
        ticks
    }
}

/// Integer tick bounds plus signed increment. A negative increment `-k`
/// encodes a step of `1/k`, which keeps decimal steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    if !(count > 0.0) {
        return None;
    }
    let step = (stop - start) / count;
    if !step.is_normal() {
        return None;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let increment = 10f64.powf(-power) / factor;
        let mut first = (start * increment).round();
        let mut last = (stop * increment).round();
        if first / increment < start {
            first += 1.0;
        }
        if last / increment > stop {
            last -= 1.0;
        }
        Some((first as i64, last as i64, -increment))
    } else {
        let increment = 10f64.powf(power) * factor;
        let mut first = (start / increment).round();
        let mut last = (stop / increment).round();
        if first * increment < start {
            first += 1.0;
        }
        if last * increment > stop {
            last -= 1.0;
        }
        Some((first as i64, last as i64, increment))
    }
}

/// `(min, max)` over the finite values, or `None` when there are none.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Scales derived once from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotScales {
    /// Raw extent over both accessors before nicing; `None` for an empty dataset.
    pub temperature_extent: Option<(f64, f64)>,
    pub x: LinearScale,
    pub y: LinearScale,
    pub color: CyclicColorScale,
}

impl PlotScales {
    /// Builds the shared square position scales and the seasonal color scale.
    ///
    /// Both position scales use the extent of the union of `x_accessor` and
    /// `y_accessor` values, so equal temperatures land at equal offsets on
    /// either axis. An empty dataset yields the degenerate domain `[0, 0]`.
    #[must_use]
    pub fn build(
        points: &[DataPoint],
        x_accessor: Accessor,
        y_accessor: Accessor,
        reference_year: i32,
        bounds: Viewport,
    ) -> Self {
        let temperature_extent = extent(
            points
                .iter()
                .flat_map(|point| [x_accessor.value(point), y_accessor.value(point)]),
        );
        let domain = temperature_extent.unwrap_or((0.0, 0.0));

        let x = LinearScale::new(domain, (0.0, bounds.width)).nice(DEFAULT_NICE_COUNT);
        let y = LinearScale::new(domain, (bounds.height, 0.0)).nice(DEFAULT_NICE_COUNT);

        Self {
            temperature_extent,
            x,
            y,
            color: CyclicColorScale::new(reference_year),
        }
    }

    /// Legend axis sharing the color scale's date domain.
    #[must_use]
    pub fn legend_date_scale(&self, legend_width: f64) -> DateScale {
        let (start, end) = self.color.domain();
        DateScale::new(start, end, (0.0, legend_width))
    }
}
