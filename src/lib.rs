//! Chart coordination layer and diagnostic TUI for a QoS network monitor.
//!
//! The crate coordinates a set of live telemetry charts over one backend:
//! every chart shares a time-window vocabulary, a broadcast registry keeps
//! the windows synchronized, and a pluggable [`ChartHost`](chart::ChartHost)
//! does the actual drawing.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Backend (/query/*)                   │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 │ HttpQueryClient
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TelemetrySource ──▶ ChartWidget ◀──▶ WidgetRegistry         │
//! │                          │  ▲            (period broadcast)  │
//! │                     draw │  │ range_changed / button press   │
//! │                          ▼  │                                │
//! │                       ChartHost (TuiHost)                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Module map:
//! - [`data`]: period tokens, time ranges, the captured-offset local clock
//! - [`chart`]: the host-neutral chart contract (series, layout, listeners)
//! - [`query`]: wire types and the HTTP telemetry source
//! - [`widget`]: live widgets, the registry, the funnel composite, gauges
//! - [`ui`], [`app`], [`events`], [`config`]: the terminal dashboard binary
//!
//! # Examples
//!
//! Resolving a period token to its query window:
//!
//! ```
//! use qosboard::TimeRange;
//!
//! let range = TimeRange::resolve("24h");
//! assert_eq!(range.range_param(), "start: -24h");
//! assert_eq!(range.bucket_param(), "1h");
//! ```
//!
//! Querying a backend directly, without any widgets:
//!
//! ```no_run
//! use qosboard::{HttpQueryClient, TelemetrySource, TimeRange};
//!
//! # tokio_test::block_on(async {
//! let client = HttpQueryClient::builder()
//!     .endpoint("http://localhost:8000")
//!     .build()
//!     .unwrap();
//! let range = TimeRange::resolve("1h");
//! let samples = client.latency_site("main", &range).await.unwrap();
//! println!("{} latency buckets", samples.len());
//! # });
//! ```

pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod events;
pub mod query;
pub mod ui;
pub mod widget;

pub use chart::{ChartHost, ControlBar, ControlListener, RangeListener};
pub use config::Settings;
pub use data::{LocalClock, TimeRange};
pub use query::{FunnelScope, HttpQueryClient, QueryError, TelemetrySource};
pub use widget::{
    ChartKind, ChartWidget, CompositeFunnelView, DashboardWidget, GaugeKind, GaugeWidget,
    WidgetContext, WidgetRegistry,
};
