//! One series/layout mapping per telemetry kind.
//!
//! Each kind knows its endpoint, how the response maps onto named series,
//! and its axis configuration. Kinds are a tagged enum rather than a
//! subclass hierarchy; [`fetch_spec`] is the single dispatch point.

use crate::chart::{Layout, Series, SeriesStyle};
use crate::data::{LocalClock, TimeRange};
use crate::query::{
    AvgSample, FunnelHistory, LatencySample, QueryError, TelemetrySource, ThroughputSample,
};

/// Fill color for the latency min/max band.
const BAND_FILL: &str = "rgba(128,128,243,0.2)";
/// Fill color for the upload area on bandwidth/drops charts.
const UPLOAD_FILL: &str = "#0000ff";
/// Line colors for the constant limit series.
const UP_LIMIT_COLOR: &str = "#ffdddd";
const DOWN_LIMIT_COLOR: &str = "#ddffdd";

/// The telemetry kind a chart widget renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Min/avg/max latency band per site.
    Latency,
    /// Access-point channel frequency.
    Frequency,
    /// Access-point noise floor.
    Noise,
    /// Client signal strength.
    Signal,
    /// Upload/download throughput areas.
    Bandwidth,
    /// Throughput areas mirrored around zero with plan-limit lines.
    BandwidthWithLimits { max_down: f64, max_up: f64 },
    /// Queue drops per direction.
    Drops,
    /// Stacked per-child-site download throughput, from attached history.
    FunnelDown,
    /// Stacked per-child-site upload throughput, from attached history.
    FunnelUp,
}

/// Everything a host needs for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub series: Vec<Series>,
    pub layout: Layout,
}

/// Fetch and map the data for a non-funnel kind.
pub(crate) async fn fetch_spec(
    kind: &ChartKind,
    source: &dyn TelemetrySource,
    subject: &str,
    range: &TimeRange,
    clock: &LocalClock,
) -> Result<ChartSpec, QueryError> {
    match kind {
        ChartKind::Latency => {
            let samples = source.latency_site(subject, range).await?;
            Ok(latency_spec(&samples, clock))
        }
        ChartKind::Frequency => {
            let samples = source.ap_frequency(subject, range).await?;
            Ok(metric_spec(&samples, clock, "MHz"))
        }
        ChartKind::Noise => {
            let samples = source.ap_noise(subject, range).await?;
            Ok(metric_spec(&samples, clock, "dB"))
        }
        ChartKind::Signal => {
            let samples = source.signal(subject, range).await?;
            Ok(metric_spec(&samples, clock, "dB"))
        }
        ChartKind::Bandwidth => {
            let samples = source.site_bandwidth(subject, range).await?;
            Ok(bandwidth_spec(&samples, clock))
        }
        ChartKind::BandwidthWithLimits { max_down, max_up } => {
            let samples = source.site_bandwidth(subject, range).await?;
            Ok(bandwidth_with_limits_spec(&samples, clock, *max_down, *max_up))
        }
        ChartKind::Drops => {
            let samples = source.site_drops(subject, range).await?;
            Ok(drops_spec(&samples, clock))
        }
        ChartKind::FunnelDown | ChartKind::FunnelUp => {
            unreachable!("funnel kinds render from attached history")
        }
    }
}

/// Average line with a min/max band shaded around it.
pub fn latency_spec(samples: &[LatencySample], clock: &LocalClock) -> ChartSpec {
    let mut average = Series::new("Average", SeriesStyle::line());
    let mut min = Series::new("Min", SeriesStyle::band(BAND_FILL));
    let mut max = Series::new("Max", SeriesStyle::band(BAND_FILL));

    for sample in samples {
        let x = clock.to_local_time(&sample.date);
        average.push(x.clone(), sample.avg);
        min.push(x.clone(), sample.min);
        max.push(x, sample.max);
    }

    ChartSpec {
        series: vec![average, min, max],
        layout: Layout::for_unit("ms"),
    }
}

/// Single average line (frequency, noise, signal).
pub fn metric_spec(samples: &[AvgSample], clock: &LocalClock, unit: &str) -> ChartSpec {
    let mut average = Series::new("Average", SeriesStyle::line());
    for sample in samples {
        average.push(clock.to_local_time(&sample.date), sample.avg);
    }

    ChartSpec {
        series: vec![average],
        layout: Layout::for_unit(unit),
    }
}

/// Upload and download throughput as zero-filled areas.
pub fn bandwidth_spec(samples: &[ThroughputSample], clock: &LocalClock) -> ChartSpec {
    let (up, down) = up_down_areas(samples, clock, "Upload", "Download");
    ChartSpec {
        series: vec![up, down],
        layout: Layout::for_unit("Mbps"),
    }
}

/// Queue drops per direction as zero-filled areas.
pub fn drops_spec(samples: &[ThroughputSample], clock: &LocalClock) -> ChartSpec {
    let (up, down) = up_down_areas(samples, clock, "Up Drops", "Down Drops");
    ChartSpec {
        series: vec![up, down],
        layout: Layout::for_unit("Drops"),
    }
}

fn up_down_areas(
    samples: &[ThroughputSample],
    clock: &LocalClock,
    up_name: &str,
    down_name: &str,
) -> (Series, Series) {
    let mut up = Series::new(up_name, SeriesStyle::area_colored(UPLOAD_FILL));
    let mut down = Series::new(down_name, SeriesStyle::area());
    for sample in samples {
        let x = clock.to_local_time(&sample.time);
        up.push(x.clone(), sample.up);
        down.push(x, sample.down);
    }
    (up, down)
}

/// Throughput mirrored around zero (upload negated) with constant limit
/// lines at the site's plan speeds.
pub fn bandwidth_with_limits_spec(
    samples: &[ThroughputSample],
    clock: &LocalClock,
    max_down: f64,
    max_up: f64,
) -> ChartSpec {
    let mut up = Series::new("Upload", SeriesStyle::area());
    let mut down = Series::new("Download", SeriesStyle::area());
    let mut up_limit = Series::new("Limit ▲", SeriesStyle::line_colored(UP_LIMIT_COLOR));
    let mut down_limit = Series::new("Limit ▼", SeriesStyle::line_colored(DOWN_LIMIT_COLOR));

    for sample in samples {
        let x = clock.to_local_time(&sample.time);
        up.push(x.clone(), -sample.up);
        down.push(x.clone(), sample.down);
        up_limit.push(x.clone(), -max_up);
        down_limit.push(x, max_down);
    }

    ChartSpec {
        series: vec![up, down, up_limit, down_limit],
        layout: Layout::for_unit("Mbps"),
    }
}

/// Which throughput direction a funnel chart stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelDirection {
    Down,
    Up,
}

/// One stacked series per child site, in the backend's sort order.
pub fn funnel_spec(
    history: &FunnelHistory,
    direction: FunnelDirection,
    clock: &LocalClock,
) -> ChartSpec {
    let mut series = Vec::with_capacity(history.sites.len());
    for (site, samples) in &history.sites {
        let mut trace = Series::new(site.clone(), SeriesStyle::stacked("one"));
        for sample in samples {
            let y = match direction {
                FunnelDirection::Down => sample.down,
                FunnelDirection::Up => sample.up,
            };
            trace.push(clock.to_local_time(&sample.time), y);
        }
        series.push(trace);
    }

    ChartSpec {
        series,
        layout: Layout::for_unit("Mbps"),
    }
}
