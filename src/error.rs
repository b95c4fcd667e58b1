use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid geometry: width={width}, height={height}")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to load data: {0}")]
    DataLoad(String),

    #[error("row {row}: date `{value}` does not match format `{format}`")]
    DateParse {
        row: usize,
        value: String,
        format: String,
    },

    #[error("spatial partition has no sites")]
    EmptyPartition,
}
