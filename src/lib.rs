//! extrema-chart: interactive scatter-plot engine for daily temperature
//! extrema.
//!
//! The crate derives everything a renderer needs from a list of
//! `DataPoint`s and a `ChartConfig`: shared temperature scales, a Voronoi
//! partition for nearest-point hover, smoothed marginal histograms and a
//! seasonal color legend. Pointer handling lives in `ChartSession`, which
//! turns events into `UiEffect`s instead of mutating a drawing surface.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartModel, ChartSession};
pub use error::{ChartError, ChartResult};
