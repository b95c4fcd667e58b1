pub mod color;
pub mod color_scale;
pub mod curve;
pub mod geometry;
pub mod histogram;
pub mod scale;
pub mod types;
pub mod voronoi;

pub use color::{Color, hue_distance};
pub use color_scale::{CyclicColorScale, DateScale};
pub use curve::{PathCommand, basis_curve, flatten, to_svg_path};
pub use geometry::{Polygon, clip_to_bisector, convex_contains, rect_polygon, signed_area};
pub use histogram::{
    DEFAULT_BIN_COUNT, Histogram, HistogramAxis, HistogramBin, HistogramPlacement,
    MarginalHistogram, compute_bins,
};
pub use scale::{DEFAULT_NICE_COUNT, LinearScale, PlotScales, extent};
pub use types::{Accessor, DataPoint, Point, Viewport};
pub use voronoi::{CELL_CONTAINS_TOLERANCE_PX, SITE_MERGE_TOLERANCE_PX, SpatialPartition, project};
