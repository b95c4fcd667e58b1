use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

// Cubehelix basis (Green 2011).
const CUBEHELIX_A: f64 = -0.14861;
const CUBEHELIX_B: f64 = 1.78277;
const CUBEHELIX_C: f64 = -0.29227;
const CUBEHELIX_D: f64 = -0.90649;
const CUBEHELIX_E: f64 = 1.97294;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Converts a cubehelix color (hue in degrees) to clamped RGB.
    #[must_use]
    pub fn from_cubehelix(hue_degrees: f64, saturation: f64, lightness: f64) -> Self {
        let h = (hue_degrees + 120.0).to_radians();
        let a = saturation * lightness * (1.0 - lightness);
        let (sin_h, cos_h) = h.sin_cos();

        let red = lightness + a * (CUBEHELIX_A * cos_h + CUBEHELIX_B * sin_h);
        let green = lightness + a * (CUBEHELIX_C * cos_h + CUBEHELIX_D * sin_h);
        let blue = lightness + a * (CUBEHELIX_E * cos_h);

        Self::rgb(red.clamp(0.0, 1.0), green.clamp(0.0, 1.0), blue.clamp(0.0, 1.0))
    }

    /// Cyclic rainbow through cubehelix space. `t` wraps modulo 1, so
    /// `rainbow(0.0) == rainbow(1.0) == rainbow(-1.0)`.
    #[must_use]
    pub fn rainbow(t: f64) -> Self {
        let t = if (0.0..=1.0).contains(&t) {
            t
        } else {
            t - t.floor()
        };
        let ts = (t - 0.5).abs();
        Self::from_cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
    }

    /// `#rrggbb`, alpha ignored.
    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.red), channel(self.green), channel(self.blue)]
    }

    /// HSL hue in degrees, `[0, 360)`. Achromatic colors report `0`.
    #[must_use]
    pub fn hue_degrees(self) -> f64 {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        let delta = max - min;
        if delta <= f64::EPSILON {
            return 0.0;
        }

        let hue = if max == self.red {
            ((self.green - self.blue) / delta).rem_euclid(6.0)
        } else if max == self.green {
            (self.blue - self.red) / delta + 2.0
        } else {
            (self.red - self.green) / delta + 4.0
        };
        (hue * 60.0).rem_euclid(360.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Shortest angular distance between two hues, in degrees.
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}
