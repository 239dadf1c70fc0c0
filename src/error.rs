//! Crate error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TxChartError {
    #[error("Error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Price quote unavailable: {0}")]
    Quote(String),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("Chart view has been disposed")]
    Disposed,
}
