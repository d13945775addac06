//! Wire types for the backend `/query/*` endpoints.
//!
//! These match the JSON the query backend serves. Timestamps arrive as
//! RFC 3339 strings and are converted to the viewer's wall clock just before
//! plotting, not here.

use serde::{Deserialize, Serialize};

/// One latency bucket: `/query/latency_site/{site}/{range}/{period}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySample {
    pub date: String,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// One single-metric bucket: frequency, noise and signal endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgSample {
    pub date: String,
    pub avg: f64,
}

/// One bidirectional bucket: bandwidth and drops endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSample {
    pub time: String,
    pub up: f64,
    pub down: f64,
}

/// Per-child-site throughput history from the funnel endpoints.
///
/// Sites arrive pre-sorted by the backend (ascending peak for the direct
/// tree, descending with an "others" rollup for the flattened variant).
/// Order is preserved; stacking relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelHistory {
    pub sites: Vec<(String, Vec<ThroughputSample>)>,
}

/// One resource-usage snapshot sample: cpu_load, ram_use, swap_use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSample {
    pub usage: f64,
}
