use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::format::format_date;
use crate::core::DateScale;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPhase {
    Idle,
    Hovering,
}

/// Highlighted slice of the legend while the pointer hovers over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendHighlightState {
    /// Serialized flag for host bridges. Always `true` on a live state; the
    /// idle phase is the absence of a state.
    pub active: bool,
    /// Pointer x in legend-local pixels, unclamped.
    pub center_x: f64,
    /// Left edge of the highlight bar, always in `[0, legend_width - bar_width]`.
    pub clamped_bar_x: f64,
    pub bar_width: f64,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub min_label: String,
    pub max_label: String,
}

/// Median of `{0, raw_x, legend_width - bar_width}`.
///
/// Keeps the whole bar inside the strip for any pointer x, including
/// positions far outside it.
#[must_use]
pub fn clamp_bar_x(raw_x: f64, legend_width: f64, bar_width: f64) -> f64 {
    median3(0.0, raw_x, legend_width - bar_width)
}

fn median3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).max(a.max(b).min(c))
}

/// Idle/Hovering state machine for the legend strip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendInteraction {
    highlight: Option<LegendHighlightState>,
}

impl LegendInteraction {
    #[must_use]
    pub fn phase(&self) -> LegendPhase {
        if self.highlight.is_some() {
            LegendPhase::Hovering
        } else {
            LegendPhase::Idle
        }
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&LegendHighlightState> {
        self.highlight.as_ref()
    }

    /// Enters (or stays in) `Hovering` and recomputes the highlight from
    /// pointer x in legend-local pixels.
    pub fn pointer_move(
        &mut self,
        x: f64,
        date_scale: DateScale,
        bar_width: f64,
        date_format: &str,
    ) -> ChartResult<&LegendHighlightState> {
        if !x.is_finite() {
            return Err(ChartError::InvalidData(
                "legend pointer x must be finite".to_owned(),
            ));
        }

        let (range_start, range_end) = date_scale.range();
        let legend_width = (range_end - range_start).abs();
        let clamped_bar_x = clamp_bar_x(x - bar_width * 0.5, legend_width, bar_width);
        let min_date = date_scale.invert(clamped_bar_x);
        let max_date = date_scale.invert(clamped_bar_x + bar_width);

        Ok(self.highlight.insert(LegendHighlightState {
            active: true,
            center_x: x,
            clamped_bar_x,
            bar_width,
            min_date,
            max_date,
            min_label: format_date(min_date, date_format),
            max_label: format_date(max_date, date_format),
        }))
    }

    /// Returns to `Idle`. Reports whether a highlight was cleared.
    pub fn pointer_leave(&mut self) -> bool {
        self.highlight.take().is_some()
    }
}
