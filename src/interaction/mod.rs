//! Pointer-driven state and the effects it produces.
//!
//! Handlers never touch a drawing surface. They return a `UiEffect` that a
//! rendering collaborator applies, so every interaction is testable headless.

mod hover;
mod legend;

pub use hover::HoverState;
pub use legend::{LegendHighlightState, LegendInteraction, LegendPhase, clamp_bar_x};

use serde::{Deserialize, Serialize};

use crate::core::{Color, Point};

/// Straight guide segment in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideSegment {
    pub from: Point,
    pub to: Point,
}

/// Text shown in the hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub date: String,
    pub x_label: String,
    pub x_value: String,
    pub y_label: String,
    pub y_value: String,
}

/// Everything needed to draw the hover state for one data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverOverlay {
    pub index: usize,
    /// Hovered point in plot coordinates.
    pub anchor: Point,
    /// Tooltip anchor in outer chart coordinates (plot anchor shifted by the
    /// top/left margins). The tooltip is centered above it.
    pub tooltip_anchor: Point,
    pub marker_radius: f64,
    pub marker_color: Color,
    /// From the point toward the right-hand histogram.
    pub horizontal_guide: GuideSegment,
    /// From the point toward the top histogram.
    pub vertical_guide: GuideSegment,
    pub tooltip: TooltipContent,
}

/// Legend highlight plus the points it selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendHighlight {
    pub state: LegendHighlightState,
    pub highlighted_points: Vec<usize>,
}

/// Instruction for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEffect {
    ShowTooltip(HoverOverlay),
    HideTooltip,
    SetLegendHighlight(LegendHighlight),
    ClearLegendHighlight,
}

/// Surface a pointer event was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Plot area; coordinates are plot-local.
    Plot,
    /// Legend strip; coordinates are legend-local.
    Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Move { x: f64, y: f64 },
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub target: PointerTarget,
    pub kind: PointerEventKind,
}

impl PointerEvent {
    #[must_use]
    pub fn plot_move(x: f64, y: f64) -> Self {
        Self {
            target: PointerTarget::Plot,
            kind: PointerEventKind::Move { x, y },
        }
    }

    #[must_use]
    pub fn plot_leave() -> Self {
        Self {
            target: PointerTarget::Plot,
            kind: PointerEventKind::Leave,
        }
    }

    #[must_use]
    pub fn legend_move(x: f64, y: f64) -> Self {
        Self {
            target: PointerTarget::Legend,
            kind: PointerEventKind::Move { x, y },
        }
    }

    #[must_use]
    pub fn legend_leave() -> Self {
        Self {
            target: PointerTarget::Legend,
            kind: PointerEventKind::Leave,
        }
    }
}
