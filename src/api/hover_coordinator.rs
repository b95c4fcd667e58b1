use tracing::{debug, trace};

use crate::core::Point;
use crate::error::ChartError;
use crate::interaction::{GuideSegment, HoverOverlay, HoverState, TooltipContent, UiEffect};

use super::format::{format_date, format_temperature};
use super::{ChartModel, GuideExtent};

/// Resolves plot pointer positions to data points and builds the tooltip
/// overlay for the hit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverCoordinator {
    state: HoverState,
}

impl HoverCoordinator {
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.state.hovered()
    }

    /// Handles a pointer move in plot-local coordinates.
    ///
    /// An empty partition or an unusable position counts as "no hit" and
    /// hides the tooltip.
    pub fn pointer_move(&mut self, model: &ChartModel, x: f64, y: f64) -> UiEffect {
        let located = match self.state.hovered() {
            Some(previous) => model.partition().locate_from(x, y, previous),
            None => model.partition().locate(x, y),
        };

        let index = match located {
            Ok(index) => index,
            Err(ChartError::EmptyPartition) => {
                trace!(x, y, "hover over empty partition");
                return self.pointer_leave();
            }
            Err(err) => {
                debug!(x, y, error = %err, "hover position rejected");
                return self.pointer_leave();
            }
        };

        let Some(overlay) = Self::overlay_for(model, index) else {
            return self.pointer_leave();
        };
        if self.state.on_hit(index) {
            trace!(index, "hovered point changed");
        }
        UiEffect::ShowTooltip(overlay)
    }

    pub fn pointer_leave(&mut self) -> UiEffect {
        self.state.on_leave();
        UiEffect::HideTooltip
    }

    /// Tooltip, marker and guide geometry for the point at `index`.
    #[must_use]
    pub fn overlay_for(model: &ChartModel, index: usize) -> Option<HoverOverlay> {
        let point = model.points().get(index)?;
        let anchor = model.projected(index)?;
        if !anchor.is_finite() {
            return None;
        }

        let config = model.config();
        let margin = config.dimensions.margin;
        let bounds = model.bounds();

        let right_edge = match (model.right_histogram(), config.guide_extent) {
            (Some(histogram), GuideExtent::NearEdge) => histogram.near_edge(),
            (Some(histogram), GuideExtent::FarEdge) => histogram.far_edge(),
            (None, _) => bounds.width,
        };
        let top_edge = match (model.top_histogram(), config.guide_extent) {
            (Some(histogram), GuideExtent::NearEdge) => histogram.near_edge(),
            (Some(histogram), GuideExtent::FarEdge) => histogram.far_edge(),
            (None, _) => 0.0,
        };

        let x_accessor = config.x_accessor;
        let y_accessor = config.y_accessor;
        let tooltip = TooltipContent {
            date: format_date(point.date, &config.tooltip_date_format),
            x_label: x_accessor.label().to_owned(),
            x_value: format_temperature(x_accessor.value(point), config.temperature_decimals),
            y_label: y_accessor.label().to_owned(),
            y_value: format_temperature(y_accessor.value(point), config.temperature_decimals),
        };

        Some(HoverOverlay {
            index,
            anchor,
            tooltip_anchor: Point::new(anchor.x + margin.left, anchor.y + margin.top),
            marker_radius: config.hover_marker_radius,
            marker_color: model.scales().color.color(point.date),
            horizontal_guide: GuideSegment {
                from: anchor,
                to: Point::new(right_edge, anchor.y),
            },
            vertical_guide: GuideSegment {
                from: anchor,
                to: Point::new(anchor.x, top_edge),
            },
            tooltip,
        })
    }
}
