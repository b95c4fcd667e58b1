use serde::{Deserialize, Serialize};

/// Which data point, if any, the pointer currently rests on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    #[must_use]
    pub fn hovered(self) -> Option<usize> {
        self.hovered
    }

    /// Records a hit and reports whether the hovered index changed.
    pub fn on_hit(&mut self, index: usize) -> bool {
        self.hovered.replace(index) != Some(index)
    }

    /// Clears the hovered index and reports whether one was set.
    pub fn on_leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }
}
