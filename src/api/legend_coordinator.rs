use tracing::{debug, trace};

use crate::interaction::{LegendHighlight, LegendInteraction, LegendPhase, UiEffect};

use super::ChartModel;

/// Drives the legend state machine against the model's date axis and
/// collects the points inside the highlighted range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendCoordinator {
    machine: LegendInteraction,
}

impl LegendCoordinator {
    #[must_use]
    pub fn phase(&self) -> LegendPhase {
        self.machine.phase()
    }

    #[must_use]
    pub fn machine(&self) -> &LegendInteraction {
        &self.machine
    }

    /// Handles a pointer move in legend-local coordinates.
    pub fn pointer_move(&mut self, model: &ChartModel, x: f64) -> UiEffect {
        let config = model.config();
        let state = match self.machine.pointer_move(
            x,
            model.legend_scale(),
            config.legend.bar_width(),
            &config.legend_date_format,
        ) {
            Ok(state) => state.clone(),
            Err(err) => {
                debug!(x, error = %err, "legend position rejected");
                return self.pointer_leave();
            }
        };

        let highlighted_points = model.points_in_date_range(state.min_date, state.max_date);
        trace!(
            bar_x = state.clamped_bar_x,
            min = %state.min_date,
            max = %state.max_date,
            highlighted = highlighted_points.len(),
            "legend highlight"
        );
        UiEffect::SetLegendHighlight(LegendHighlight {
            state,
            highlighted_points,
        })
    }

    pub fn pointer_leave(&mut self) -> UiEffect {
        self.machine.pointer_leave();
        UiEffect::ClearLegendHighlight
    }
}
