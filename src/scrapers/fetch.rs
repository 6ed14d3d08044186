//! Page fetching.
//!
//! [`PageSource`] is the seam between the extraction pipeline and the
//! network. [`HttpPageSource`] is the real implementation; tests swap in an
//! in-memory source.

use crate::config::Settings;
use reqwest::Client;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, instrument};

/// Something that can return the HTML body behind a URL.
pub trait PageSource {
    /// Fetch `url` and return its body as text.
    async fn fetch_html(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// [`PageSource`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    /// Build a client with the configured user agent and timeout.
    pub fn new(settings: &Settings) -> Result<Self, Box<dyn Error>> {
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl PageSource for HttpPageSource {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_html(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::FileSettings;
    use clap::Parser;

    #[tokio::test]
    async fn test_http_source_reports_connection_failure() {
        let cli = Cli::parse_from(["azernews_scraper", "--timeout-secs", "2", "list"]);
        let settings = Settings::resolve(FileSettings::default(), &cli).unwrap();
        let source = HttpPageSource::new(&settings).unwrap();
        // Port 9 (discard) on loopback is closed in test environments.
        let res = source.fetch_html("http://127.0.0.1:9/").await;
        assert!(res.is_err());
    }
}
