use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::core::LinearScale;

/// Maps a calendar date to a seasonal color, ignoring the year.
///
/// Dates are projected onto `reference_year`, normalized to `t` in `[0, 1]`
/// across Jan 1..Dec 31, and colored with `rainbow(-t)`. The negation flips the
/// default hue direction; because the rainbow wraps, Jan 1 and Dec 31 resolve
/// to the same color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclicColorScale {
    reference_year: i32,
}

impl CyclicColorScale {
    #[must_use]
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    #[must_use]
    pub fn reference_year(self) -> i32 {
        self.reference_year
    }

    /// `(Jan 1, Dec 31)` of the reference year.
    #[must_use]
    pub fn domain(self) -> (NaiveDate, NaiveDate) {
        year_bounds(self.reference_year)
    }

    /// Moves `date` onto the reference year. Feb 29 lands on Feb 28 when the
    /// reference year is not a leap year.
    #[must_use]
    pub fn normalize(self, date: NaiveDate) -> NaiveDate {
        normalize_to_year(date, self.reference_year)
    }

    /// Position of the date within the reference year, `0.0` on Jan 1 and
    /// `1.0` on Dec 31.
    #[must_use]
    pub fn day_fraction(self, date: NaiveDate) -> f64 {
        let (start, end) = self.domain();
        let span = (end - start).num_days() as f64;
        let offset = (self.normalize(date) - start).num_days() as f64;
        offset / span
    }

    #[must_use]
    pub fn color(self, date: NaiveDate) -> Color {
        self.color_at_fraction(self.day_fraction(date))
    }

    #[must_use]
    pub fn color_at_fraction(self, t: f64) -> Color {
        Color::rainbow(-t)
    }

    /// Evenly spaced `(offset, color)` pairs across the year for a gradient.
    #[must_use]
    pub fn gradient_stops(self, count: usize) -> Vec<(f64, Color)> {
        match count {
            0 => Vec::new(),
            1 => vec![(0.0, self.color_at_fraction(0.0))],
            _ => (0..count)
                .map(|i| {
                    let offset = i as f64 / (count - 1) as f64;
                    (offset, self.color_at_fraction(offset))
                })
                .collect(),
        }
    }
}

/// Linear date axis used by the legend strip.
///
/// Dates are measured in whole days from the domain start; `invert` floors the
/// fractional day so a pixel always names the calendar day it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateScale {
    start: NaiveDate,
    end: NaiveDate,
    days: LinearScale,
}

impl DateScale {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate, range: (f64, f64)) -> Self {
        let span = (end - start).num_days() as f64;
        Self {
            start,
            end,
            days: LinearScale::new((0.0, span), range),
        }
    }

    #[must_use]
    pub fn domain(self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.days.range()
    }

    #[must_use]
    pub fn map(self, date: NaiveDate) -> f64 {
        self.days.map((date - self.start).num_days() as f64)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> NaiveDate {
        let offset = self.days.invert(pixel).floor();
        if !offset.is_finite() {
            return self.start;
        }
        if offset >= 0.0 {
            self.start
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(NaiveDate::MAX)
        } else {
            self.start
                .checked_sub_days(Days::new((-offset) as u64))
                .unwrap_or(NaiveDate::MIN)
        }
    }
}

fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    (start, end)
}

fn normalize_to_year(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .unwrap_or(date)
}
