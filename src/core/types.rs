use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Size of a drawing region in pixels. Plot geometry lives in
/// `[0, width] x [0, height]` with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidGeometry {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// One day of observed temperature extrema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub temp_min: f64,
    pub temp_max: f64,
    pub date: NaiveDate,
}

impl DataPoint {
    #[must_use]
    pub fn new(temp_min: f64, temp_max: f64, date: NaiveDate) -> Self {
        Self {
            temp_min,
            temp_max,
            date,
        }
    }
}

/// Numeric field selector used for axis placement and binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accessor {
    TempMin,
    TempMax,
}

impl Accessor {
    #[must_use]
    pub fn value(self, point: &DataPoint) -> f64 {
        match self {
            Self::TempMin => point.temp_min,
            Self::TempMax => point.temp_max,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TempMin => "Minimum Temperature",
            Self::TempMax => "Maximum Temperature",
        }
    }
}

/// Screen-space position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}
