use crate::core::DataPoint;
use crate::error::ChartResult;
use crate::interaction::{PointerEvent, PointerEventKind, PointerTarget, UiEffect};

use super::{ChartConfig, ChartModel, HoverCoordinator, LegendCoordinator};

/// One chart on screen: the immutable model plus the only mutable
/// interaction state. Events are applied one at a time, each to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSession {
    model: ChartModel,
    hover: HoverCoordinator,
    legend: LegendCoordinator,
}

impl ChartSession {
    #[must_use]
    pub fn new(model: ChartModel) -> Self {
        Self {
            model,
            hover: HoverCoordinator::default(),
            legend: LegendCoordinator::default(),
        }
    }

    pub fn build(points: Vec<DataPoint>, config: ChartConfig) -> ChartResult<Self> {
        ChartModel::build(points, config).map(Self::new)
    }

    #[must_use]
    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    #[must_use]
    pub fn hover(&self) -> &HoverCoordinator {
        &self.hover
    }

    #[must_use]
    pub fn legend(&self) -> &LegendCoordinator {
        &self.legend
    }

    pub fn handle(&mut self, event: PointerEvent) -> UiEffect {
        match (event.target, event.kind) {
            (PointerTarget::Plot, PointerEventKind::Move { x, y }) => {
                self.hover.pointer_move(&self.model, x, y)
            }
            (PointerTarget::Plot, PointerEventKind::Leave) => self.hover.pointer_leave(),
            (PointerTarget::Legend, PointerEventKind::Move { x, .. }) => {
                self.legend.pointer_move(&self.model, x)
            }
            (PointerTarget::Legend, PointerEventKind::Leave) => self.legend.pointer_leave(),
        }
    }
}
