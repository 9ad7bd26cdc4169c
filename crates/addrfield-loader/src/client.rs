//! HTTP client for the address dataset file.
//!
//! One plain GET per (URL, country) pair. There is no retry: the widget
//! treats any failure as "no dataset" and carries on.

use std::time::Duration;

use addrfield_core::{LocationRecord, RuntimeConfig};
use reqwest::{Client, Url};

use crate::error::LoaderError;
use crate::parse::parse_records;

pub struct DatasetClient {
    client: Client,
}

impl DatasetClient {
    /// Creates a client with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// # Errors
    ///
    /// Same as [`DatasetClient::new`].
    pub fn from_config(config: &RuntimeConfig) -> Result<Self, LoaderError> {
        Self::new(config.fetch_timeout_secs, &config.user_agent)
    }

    /// Fetches every record in the file at `url`, for all countries.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::InvalidUrl`] if `url` does not parse.
    /// - [`LoaderError::Http`] on network failure or timeout.
    /// - [`LoaderError::UnexpectedStatus`] on any non-2xx status.
    /// - [`LoaderError::Deserialize`] if the body is not a JSON array.
    pub async fn fetch_records(&self, url: &str) -> Result<Vec<LocationRecord>, LoaderError> {
        let parsed = Self::dataset_url(url)?;

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoaderError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let records = parse_records(&body, &format!("address dataset from {url}"))?;
        tracing::debug!(url, records = records.len(), "fetched address dataset");
        Ok(records)
    }

    /// Only `http` and `https` sources are accepted.
    fn dataset_url(url: &str) -> Result<Url, LoaderError> {
        let parsed = Url::parse(url).map_err(|e| LoaderError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(LoaderError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{other}\""),
            }),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
