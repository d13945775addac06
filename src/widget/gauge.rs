//! One-shot resource gauges: CPU load bars, RAM and swap pies.
//!
//! Gauges have no time window and never register for broadcasts; the page
//! renders them once at setup (and on explicit refresh).

use std::sync::Arc;

use crate::chart::{InteractionOptions, Layout, Series, SeriesStyle};
use crate::query::QueryError;

use super::WidgetContext;

/// Which resource snapshot a gauge renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeKind {
    /// One bar per core, percent usage.
    Cpu,
    /// Used/free pie from the first sample (0..1 fraction).
    Ram,
    /// Used/free pie from the first sample (0..1 fraction).
    Swap,
}

/// A snapshot gauge bound to one container.
pub struct GaugeWidget {
    container: String,
    kind: GaugeKind,
    ctx: WidgetContext,
}

impl GaugeWidget {
    pub fn new(ctx: WidgetContext, container: impl Into<String>, kind: GaugeKind) -> Arc<Self> {
        Arc::new(Self {
            container: container.into(),
            kind,
            ctx,
        })
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Fetch the snapshot and draw. Gauges keep the host's own controls
    /// enabled; there is no time window to protect.
    pub async fn render(&self) -> Result<(), QueryError> {
        let series = match self.kind {
            GaugeKind::Cpu => {
                let usage = self.ctx.source.cpu_load().await?;
                let mut bars = Series::new("Usage", SeriesStyle::bars());
                for (core, sample) in usage.iter().enumerate() {
                    bars.push(core.to_string(), sample.usage);
                }
                vec![bars]
            }
            GaugeKind::Ram | GaugeKind::Swap => {
                let usage = match self.kind {
                    GaugeKind::Ram => self.ctx.source.ram_use().await?,
                    _ => self.ctx.source.swap_use().await?,
                };
                let mut pie = Series::new("Usage", SeriesStyle::pie());
                if let Some(first) = usage.first() {
                    pie.push("Used", first.usage);
                    pie.push("Free", 1.0 - first.usage);
                }
                vec![pie]
            }
        };

        self.ctx.host.draw(
            &self.container,
            &series,
            &Layout::gauge("% Usage"),
            &InteractionOptions::open(),
        );
        Ok(())
    }
}
