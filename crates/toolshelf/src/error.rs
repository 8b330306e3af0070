//! Failure taxonomy for loading the catalogue.
//!
//! None of these ever reach a rendered page: [`fetch_catalogue`](crate::source::fetch_catalogue)
//! logs them and degrades to an empty catalogue.

use std::path::PathBuf;

/// Why a catalogue could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request never produced a response (DNS, connect, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// A local catalogue file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalogue location looked like a URL but did not parse as one.
    #[error("invalid catalogue URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The body was not valid JSON.
    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body was valid JSON but not an array of records.
    #[error("catalogue must be a JSON array, got {0}")]
    NotArray(&'static str),
}
