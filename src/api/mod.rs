mod chart_model;
mod config;
pub mod format;
mod hover_coordinator;
mod legend_coordinator;
mod scene_builder;
mod session;

pub use chart_model::ChartModel;
pub use config::{ChartConfig, ChartDimensions, GuideExtent, LegendDimensions, Margins};
pub use hover_coordinator::HoverCoordinator;
pub use legend_coordinator::LegendCoordinator;
pub use session::ChartSession;
