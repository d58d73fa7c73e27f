/// Error types for loading groundwater datasets
use thiserror::Error;

/// Main error type for GWL dataset operations
#[derive(Error, Debug)]
pub enum GwlError {
    /// Failed to read the dataset file
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(String),

    /// Server answered with a non-success status
    #[error("Dataset request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Remote datasets need the `api` feature
    #[error("Fetching {0} requires the `api` feature")]
    RemoteUnsupported(String),

    /// Failed to read the CSV header row
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to decompress a gzip dataset
    #[error("Failed to decompress {path}: {source}")]
    Decompression {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Results using GwlError
pub type Result<T> = std::result::Result<T, GwlError>;
