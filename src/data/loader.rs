use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Raw CSV row. Columns other than these three are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    tempmin: f64,
    tempmax: f64,
    datetime: String,
}

impl RawRecord {
    fn into_point(self, row: usize, date_format: &str) -> ChartResult<DataPoint> {
        if !self.tempmin.is_finite() || !self.tempmax.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "row {row}: temperatures must be finite"
            )));
        }
        let date = NaiveDate::parse_from_str(self.datetime.trim(), date_format).map_err(|_| {
            ChartError::DateParse {
                row,
                value: self.datetime.clone(),
                format: date_format.to_owned(),
            }
        })?;
        Ok(DataPoint::new(self.tempmin, self.tempmax, date))
    }
}

/// Outcome of a load: accepted points in source order plus every excluded
/// row with the reason it was dropped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub points: Vec<DataPoint>,
    /// `(row, error)` pairs; `row` is 1-based and excludes the header line.
    pub skipped: Vec<(usize, ChartError)>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parses headed CSV from `reader`.
///
/// Malformed rows are skipped and recorded. Only I/O failures of the
/// underlying reader fail the whole load.
pub fn parse_records<R: Read>(reader: R, date_format: &str) -> ChartResult<LoadReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for (index, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let row = index + 1;
        let outcome = match result {
            Ok(raw) => raw.into_point(row, date_format),
            Err(err) if err.is_io_error() => {
                return Err(ChartError::DataLoad(err.to_string()));
            }
            Err(err) => Err(ChartError::InvalidData(format!("row {row}: {err}"))),
        };

        match outcome {
            Ok(point) => report.points.push(point),
            Err(err) => {
                warn!(row, error = %err, "skipping weather row");
                report.skipped.push((row, err));
            }
        }
    }

    info!(
        points = report.points.len(),
        skipped = report.skipped.len(),
        "weather records parsed"
    );
    Ok(report)
}

pub fn load_csv_path(path: impl AsRef<Path>, date_format: &str) -> ChartResult<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| ChartError::DataLoad(format!("{}: {err}", path.display())))?;
    parse_records(file, date_format)
}

/// Loads `path`, degrading to an empty dataset when the source is unusable.
#[must_use]
pub fn load_or_empty(path: impl AsRef<Path>, date_format: &str) -> Vec<DataPoint> {
    match load_csv_path(path, date_format) {
        Ok(report) => report.points,
        Err(err) => {
            warn!(error = %err, "weather data unavailable, continuing with an empty dataset");
            Vec::new()
        }
    }
}
