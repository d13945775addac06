//! Time-window resolution for chart queries.
//!
//! Every chart carries a [`TimeRange`]: a span (relative to now, or an
//! explicit interval from an interactive zoom) plus the aggregation bucket
//! width requested from the backend. Buckets get coarser as spans get longer
//! so the number of returned points stays plottable.

use chrono::{DateTime, SecondsFormat, Utc};

/// The nine period buttons shown on every chart's control bar, in order.
///
/// `5m`, `30m` and `2h` also resolve but are not exposed as buttons.
pub const BUTTON_TOKENS: [&str; 9] = ["15m", "1h", "6h", "12h", "24h", "7d", "1m", "3m", "1y"];

/// Bucket width used for every interactively zoomed range, regardless of
/// span. Known scalability limitation, kept deliberately: zooming out to a
/// year at 1-minute buckets asks the backend for a very large result.
pub const ZOOM_BUCKET: &str = "1m";

/// The time span of a query window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Relative to now, e.g. `-24h`.
    Relative(String),
    /// Explicit interval from an interactive zoom, RFC 3339 bounds.
    Between { start: String, stop: String },
}

/// A resolved time window: span plus aggregation bucket width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub span: Span,
    /// Aggregation bucket width as a duration string (`1m`, `150s`, `8h`).
    pub bucket: String,
}

impl TimeRange {
    /// Resolve a named period token to its fixed (span, bucket) pair.
    ///
    /// Unknown tokens fall back to the last hour at 1-minute buckets.
    pub fn resolve(token: &str) -> Self {
        let (span, bucket) = match token {
            "5m" => ("-5m", "1m"),
            "15m" => ("-15m", "1m"),
            "30m" => ("-30m", "2m"),
            "1h" => ("-1h", "150s"),
            "2h" => ("-2h", "3m"),
            "6h" => ("-6h", "5m"),
            "12h" => ("-12h", "10m"),
            "24h" => ("-24h", "1h"),
            "7d" => ("-7d", "4h"),
            "1m" => ("-30d", "8h"),
            "3m" => ("-90d", "12h"),
            "1y" => ("-365d", "24h"),
            _ => ("-1h", "1m"),
        };
        Self {
            span: Span::Relative(span.to_string()),
            bucket: bucket.to_string(),
        }
    }

    /// Build an explicit range from an interactive zoom selection.
    ///
    /// The bucket is always [`ZOOM_BUCKET`], however wide the selection.
    pub fn between(lower: DateTime<Utc>, upper: DateTime<Utc>) -> Self {
        Self {
            span: Span::Between {
                start: lower.to_rfc3339_opts(SecondsFormat::Millis, true),
                stop: upper.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            bucket: ZOOM_BUCKET.to_string(),
        }
    }

    /// The range descriptor the backend expects in the URL path.
    pub fn range_param(&self) -> String {
        match &self.span {
            Span::Relative(rel) => format!("start: {}", rel),
            Span::Between { start, stop } => format!("start: {}, stop: {}", start, stop),
        }
    }

    /// The bucket descriptor the backend expects in the URL path.
    pub fn bucket_param(&self) -> &str {
        &self.bucket
    }

    /// Whether this range came from an interactive zoom.
    pub fn is_explicit(&self) -> bool {
        matches!(self.span, Span::Between { .. })
    }
}
