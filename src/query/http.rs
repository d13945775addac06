//! HTTP implementation of [`TelemetrySource`] over the `/query/*` API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::data::TimeRange;

use super::error::QueryError;
use super::types::{AvgSample, FunnelHistory, LatencySample, ThroughputSample, UsageSample};
use super::{FunnelScope, TelemetrySource};

/// Query client for the dashboard's HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    client: Client,
    base_url: String,
}

impl HttpQueryClient {
    /// Create a builder for configuring the client.
    pub fn builder() -> HttpQueryClientBuilder {
        HttpQueryClientBuilder::default()
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T, QueryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "query");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(QueryError::Http(format!(
                "{} returned status {}",
                path,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))
    }
}

/// Path for a range-parameterized query, descriptors percent-encoded.
pub(crate) fn ranged_path(family: &str, subject: &str, range: &TimeRange) -> String {
    format!(
        "/query/{}/{}/{}/{}",
        family,
        subject,
        urlencoded(&range.range_param()),
        urlencoded(range.bucket_param())
    )
}

/// Percent-encode a path segment. Range descriptors contain spaces, colons
/// and commas; everything outside the unreserved set is escaped.
fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[async_trait]
impl TelemetrySource for HttpQueryClient {
    async fn latency_site(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<LatencySample>, QueryError> {
        self.get_json(ranged_path("latency_site", site, range)).await
    }

    async fn ap_frequency(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<AvgSample>, QueryError> {
        self.get_json(ranged_path("ap_frequency", site, range)).await
    }

    async fn ap_noise(&self, site: &str, range: &TimeRange) -> Result<Vec<AvgSample>, QueryError> {
        self.get_json(ranged_path("ap_noise", site, range)).await
    }

    async fn signal(&self, site: &str, range: &TimeRange) -> Result<Vec<AvgSample>, QueryError> {
        self.get_json(ranged_path("signal", site, range)).await
    }

    async fn site_bandwidth(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<ThroughputSample>, QueryError> {
        self.get_json(ranged_path("site_bandwidth", site, range)).await
    }

    async fn site_drops(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<ThroughputSample>, QueryError> {
        self.get_json(ranged_path("site_drops", site, range)).await
    }

    async fn site_funnel(
        &self,
        node: &str,
        range: &TimeRange,
        scope: FunnelScope,
    ) -> Result<FunnelHistory, QueryError> {
        let family = match scope {
            FunnelScope::DirectChildren => "site_funnel",
            FunnelScope::AllSites => "site_funnel_sites",
        };
        self.get_json(ranged_path(family, node, range)).await
    }

    async fn cpu_load(&self) -> Result<Vec<UsageSample>, QueryError> {
        self.get_json("/query/cpu_load".to_string()).await
    }

    async fn ram_use(&self) -> Result<Vec<UsageSample>, QueryError> {
        self.get_json("/query/ram_use".to_string()).await
    }

    async fn swap_use(&self) -> Result<Vec<UsageSample>, QueryError> {
        self.get_json("/query/swap_use".to_string()).await
    }
}

/// Builder for [`HttpQueryClient`].
#[derive(Debug, Default)]
pub struct HttpQueryClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl HttpQueryClientBuilder {
    /// Set the backend base URL (e.g. "http://localhost:8000").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout. No timeout by default: a stuck request
    /// leaves its widget on the loading placeholder, matching the
    /// dashboard's no-cancellation model.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpQueryClient, QueryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        let base_url = self
            .endpoint
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(HttpQueryClient { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_descriptors_are_percent_encoded_in_paths() {
        let range = TimeRange::resolve("24h");
        assert_eq!(
            ranged_path("latency_site", "site-1", &range),
            "/query/latency_site/site-1/start%3A%20-24h/1h"
        );
    }

    #[test]
    fn explicit_ranges_encode_both_bounds() {
        use chrono::TimeZone;
        let lower = chrono::Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
        let upper = chrono::Utc.with_ymd_and_hms(2023, 6, 1, 13, 0, 0).unwrap();
        let range = TimeRange::between(lower, upper);
        let path = ranged_path("site_bandwidth", "root", &range);
        assert!(path.starts_with("/query/site_bandwidth/root/start%3A%202023-06-01T12"));
        assert!(path.contains("%2C%20stop%3A%20"));
        assert!(path.ends_with("/1m"));
    }

    #[test]
    fn unreserved_characters_pass_through_unescaped() {
        assert_eq!(urlencoded("abc-123_.~"), "abc-123_.~");
        assert_eq!(urlencoded("a b:c,d"), "a%20b%3Ac%2Cd");
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let client = HttpQueryClient::builder()
            .endpoint("http://example.com/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://example.com");
    }
}
