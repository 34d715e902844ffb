//! HTTP client for the Serper Google Search API.

use std::time::Duration;

use presswatch_core::AppConfig;
use reqwest::Client;

use crate::error::SearchError;
use crate::record::format_block;
use crate::types::{RawResult, SearchRequest, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";

/// Request shaping shared by every query of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Geolocation, e.g. `ar`.
    pub gl: String,
    /// Interface language, e.g. `es`.
    pub hl: String,
    /// Results requested from the provider per query.
    pub num: u32,
    /// Records written to a block per query.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            gl: "ar".to_string(),
            hl: "es".to_string(),
            num: 20,
            max_results: 30,
        }
    }
}

/// Client for Serper's `/search` endpoint.
///
/// Use [`SerperClient::new`] for production or [`SerperClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
    options: SearchOptions,
}

impl SerperClient {
    /// Creates a client pointed at the production Serper API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        options: SearchOptions,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, timeout_secs, options, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        options: SearchOptions,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("presswatch/0.1 (media-monitoring)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            options,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let options = SearchOptions {
            gl: config.search_gl.clone(),
            hl: config.search_hl.clone(),
            num: config.search_num,
            max_results: config.max_results_per_query,
        };
        Self::with_base_url(
            &config.serper_api_key,
            config.request_timeout_secs,
            options,
            &config.serper_base_url,
        )
    }

    /// Searches Google through Serper, restricted to the last `window_days` days.
    ///
    /// Returns news results followed by organic results, unfiltered.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::UnexpectedStatus`] on any non-2xx status.
    /// - [`SearchError::Deserialize`] if the body is not the expected JSON.
    pub async fn search(
        &self,
        query: &str,
        window_days: u32,
    ) -> Result<Vec<RawResult>, SearchError> {
        let url = format!("{}/search", self.base_url);
        let request = SearchRequest {
            q: query,
            gl: &self.options.gl,
            hl: &self.options.hl,
            num: self.options.num,
            tbs: format!("qdr:d{window_days}"),
        };

        tracing::debug!(query, window_days, "Serper search request");

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        let results = parsed.into_results();
        if results.is_empty() {
            let preview: String = body.chars().take(200).collect();
            tracing::warn!(query, response = %preview, "Serper returned 0 results");
        } else {
            tracing::info!(query, count = results.len(), "Serper returned candidates");
        }
        Ok(results)
    }

    /// Searches and flattens the results into a record block.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoResults`] if no result carries a usable link,
    /// otherwise the errors of [`SerperClient::search`].
    pub async fn search_block(&self, query: &str, window_days: u32) -> Result<String, SearchError> {
        let results = self.search(query, window_days).await?;
        let block = format_block(&results, self.options.max_results);
        if block.is_empty() {
            return Err(SearchError::NoResults {
                query: query.to_string(),
            });
        }
        Ok(block)
    }
}
