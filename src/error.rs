use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Why a single page could not be mirrored. Never fatal for the whole run.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("not found: {url}")]
    NotFound { url: Url },

    #[error("unexpected status {status} for {url}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
    },

    #[error("GET {url}: {source}")]
    Http {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("url path cannot be mirrored: {0}")]
    UnsafePath(String),

    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
