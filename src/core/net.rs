// src/core/net.rs
// Blocking HTTP GET for result pages. One request at a time, no retries.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use crate::config::ScrapeOptions;
use crate::error::ScrapeError;

/// Where result pages come from.
///
/// `Ok(None)` means the page does not exist (404); every other failure is
/// an error the caller should surface.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<Option<String>, ScrapeError>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .user_agent(opts.user_agent.clone())
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Option<String>, ScrapeError> {
        let transport = |source| ScrapeError::Transport { url: url.to_string(), source };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        debug!(%url, %status, "GET");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ScrapeError::Status { status: status.as_u16(), url: url.to_string() });
        }
        resp.text().map(Some).map_err(transport)
    }
}

/// Canned pages keyed by URL; anything missing is a 404.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, url: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.pages.get(url).cloned())
    }
}
