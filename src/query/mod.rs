//! Telemetry query backend abstraction.
//!
//! [`TelemetrySource`] is the read-only query API the dashboard consumes,
//! one method per endpoint family. [`HttpQueryClient`] is the production
//! implementation; tests substitute in-memory sources.

mod error;
mod http;
mod types;

pub use error::QueryError;
pub use http::{HttpQueryClient, HttpQueryClientBuilder};
pub use types::{AvgSample, FunnelHistory, LatencySample, ThroughputSample, UsageSample};

use async_trait::async_trait;

use crate::data::TimeRange;

/// Which funnel endpoint a composite view queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelScope {
    /// `/query/site_funnel/...`: one series per direct tree child.
    DirectChildren,
    /// `/query/site_funnel_sites/...`: flattened site list, capped by the
    /// backend with an "others" rollup.
    AllSites,
}

/// Read-only time-series query API.
///
/// All calls are request/response with no retry; callers decide what a
/// failure means (for chart widgets: log and leave the loading placeholder).
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn latency_site(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<LatencySample>, QueryError>;

    async fn ap_frequency(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<AvgSample>, QueryError>;

    async fn ap_noise(&self, site: &str, range: &TimeRange) -> Result<Vec<AvgSample>, QueryError>;

    async fn signal(&self, site: &str, range: &TimeRange) -> Result<Vec<AvgSample>, QueryError>;

    async fn site_bandwidth(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<ThroughputSample>, QueryError>;

    async fn site_drops(
        &self,
        site: &str,
        range: &TimeRange,
    ) -> Result<Vec<ThroughputSample>, QueryError>;

    async fn site_funnel(
        &self,
        node: &str,
        range: &TimeRange,
        scope: FunnelScope,
    ) -> Result<FunnelHistory, QueryError>;

    /// Snapshot of per-core CPU usage. Not range-parameterized.
    async fn cpu_load(&self) -> Result<Vec<UsageSample>, QueryError>;

    /// Snapshot of RAM usage as a 0..1 fraction.
    async fn ram_use(&self) -> Result<Vec<UsageSample>, QueryError>;

    /// Snapshot of swap usage as a 0..1 fraction.
    async fn swap_use(&self) -> Result<Vec<UsageSample>, QueryError>;
}
