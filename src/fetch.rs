use anyhow::Context as _;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

use crate::error::PageError;

const USER_AGENT_VALUE: &str = concat!("sitemirror/", env!("CARGO_PKG_VERSION"));
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// Blocking GET client. No timeout or retry beyond the reqwest defaults.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }

    /// Returns the raw response body of a 2xx response.
    pub fn get(&self, url: &Url) -> Result<Vec<u8>, PageError> {
        let http_error = |source: reqwest::Error| PageError::Http {
            url: url.clone(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PageError::NotFound { url: url.clone() });
        }
        if !status.is_success() {
            return Err(PageError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = response.bytes().map_err(http_error)?;
        Ok(body.to_vec())
    }
}
