//! Live chart widgets and their coordination.
//!
//! A [`ChartWidget`] owns a container, a time range and a render cycle; the
//! [`WidgetRegistry`] keeps every registered widget's window synchronized.
//! Period buttons broadcast through the registry (all widgets change in
//! lock-step); an interactive zoom re-renders only the zoomed widget.
//!
//! - [`kind`]: per-telemetry-kind series and layout mappings
//! - [`registry`]: the broadcast registry
//! - [`funnel`]: composite down/up funnel pair sharing one fetch
//! - [`gauge`]: one-shot resource gauges

pub mod funnel;
pub mod gauge;
pub mod kind;
pub mod registry;

pub use funnel::CompositeFunnelView;
pub use gauge::{GaugeKind, GaugeWidget};
pub use kind::{ChartKind, ChartSpec, FunnelDirection};
pub use registry::WidgetRegistry;

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::chart::{ChartHost, ControlBar, ControlListener, InteractionOptions, RangeListener};
use crate::data::{LocalClock, TimeRange};
use crate::query::{FunnelHistory, QueryError, TelemetrySource};

/// Shared render target for the zoom modal. A popped-out widget renders
/// here from then on.
pub const MODAL_TARGET: &str = "modal_body";

/// Delay between the zoom trigger and the modal re-render, giving the modal
/// time to become visible before the host measures container geometry.
const POPOUT_DELAY: Duration = Duration::from_millis(100);

/// Everything a widget needs from its environment, bundled so constructors
/// stay readable.
#[derive(Clone)]
pub struct WidgetContext {
    pub host: Arc<dyn ChartHost>,
    pub source: Arc<dyn TelemetrySource>,
    pub clock: LocalClock,
    /// Runtime handle render tasks are spawned on.
    pub tasks: Handle,
}

/// A registry entry: anything that reacts to a broadcast period change.
#[async_trait]
pub trait DashboardWidget: Send + Sync {
    /// The container this widget was created in (widget identity).
    fn container(&self) -> &str;

    /// Replace the widget's render output with the loading placeholder.
    fn show_loading(&self);

    /// Adopt a named period token.
    fn set_period(&self, token: &str);

    /// Query and redraw. Failures leave the loading placeholder in place.
    async fn render(&self) -> Result<(), QueryError>;
}

/// A single live chart: container identity, current time range, and the
/// fetch/map/draw cycle for its [`ChartKind`].
pub struct ChartWidget {
    container: String,
    /// Render target, `{container}_g` until popped out to the modal.
    graph_target: Mutex<String>,
    subject: String,
    kind: ChartKind,
    range: Mutex<TimeRange>,
    /// Shared payload attached by a composite view; only funnel kinds read it.
    history: Mutex<Option<FunnelHistory>>,
    ctx: WidgetContext,
    registry: Weak<WidgetRegistry>,
    weak_self: Weak<ChartWidget>,
}

impl ChartWidget {
    /// Create a widget, mount its control bar, show the loading placeholder
    /// and (when `participates_in_broadcast`) register it.
    ///
    /// Composite sub-widgets pass `false` so a broadcast reaches them once,
    /// through their owner.
    pub fn new(
        ctx: WidgetContext,
        container: impl Into<String>,
        subject: impl Into<String>,
        kind: ChartKind,
        period: &str,
        registry: &Arc<WidgetRegistry>,
        participates_in_broadcast: bool,
    ) -> Arc<Self> {
        let container = container.into();
        let graph_target = format!("{}_g", container);

        let widget = Arc::new_cyclic(|weak_self| Self {
            container: container.clone(),
            graph_target: Mutex::new(graph_target.clone()),
            subject: subject.into(),
            kind,
            range: Mutex::new(TimeRange::resolve(period)),
            history: Mutex::new(None),
            ctx,
            registry: Arc::downgrade(registry),
            weak_self: weak_self.clone(),
        });

        widget.ctx.host.show_loading(&graph_target);
        widget.ctx.host.mount_control_bar(
            &container,
            &ControlBar::standard(),
            widget.clone() as Arc<dyn ControlListener>,
        );
        if participates_in_broadcast {
            registry.register(widget.clone());
        }
        widget
    }

    /// The current render target (the modal after a pop-out).
    pub fn render_target(&self) -> String {
        self.graph_target.lock().clone()
    }

    /// The widget's current time range.
    pub fn current_range(&self) -> TimeRange {
        self.range.lock().clone()
    }

    /// Attach the shared funnel payload this widget draws from.
    pub fn attach_history(&self, history: FunnelHistory) {
        *self.history.lock() = Some(history);
    }

    /// Spawn a fire-and-forget render on the task handle.
    fn spawn_render(&self) {
        let Some(widget) = self.weak_self.upgrade() else {
            return;
        };
        self.ctx.tasks.spawn(async move {
            if let Err(err) = widget.render().await {
                warn!(container = %widget.container, error = %err, "render failed");
            }
        });
    }

    /// Pop this widget out into the shared modal target and re-render
    /// after a short delay. The retarget is permanent; the widget keeps
    /// rendering into the modal afterwards.
    fn pop_out(&self) {
        let Some(widget) = self.weak_self.upgrade() else {
            return;
        };
        self.ctx.tasks.spawn(async move {
            tokio::time::sleep(POPOUT_DELAY).await;
            widget.ctx.host.show_loading(&widget.render_target());
            *widget.graph_target.lock() = MODAL_TARGET.to_string();
            if let Err(err) = widget.render().await {
                warn!(container = %widget.container, error = %err, "modal render failed");
            }
        });
    }

    /// Series for a funnel kind, from the attached payload. A missing
    /// payload draws as an empty chart.
    fn attached_funnel_spec(&self, direction: FunnelDirection) -> ChartSpec {
        let history = self.history.lock();
        let empty = FunnelHistory { sites: Vec::new() };
        kind::funnel_spec(history.as_ref().unwrap_or(&empty), direction, &self.ctx.clock)
    }
}

#[async_trait]
impl DashboardWidget for ChartWidget {
    fn container(&self) -> &str {
        &self.container
    }

    fn show_loading(&self) {
        self.ctx.host.show_loading(&self.render_target());
    }

    fn set_period(&self, token: &str) {
        *self.range.lock() = TimeRange::resolve(token);
    }

    async fn render(&self) -> Result<(), QueryError> {
        let range = self.current_range();
        let target = self.render_target();
        debug!(container = %self.container, range = %range.range_param(), "render");

        let spec = match &self.kind {
            ChartKind::FunnelDown => self.attached_funnel_spec(FunnelDirection::Down),
            ChartKind::FunnelUp => self.attached_funnel_spec(FunnelDirection::Up),
            queried => {
                kind::fetch_spec(
                    queried,
                    self.ctx.source.as_ref(),
                    &self.subject,
                    &range,
                    &self.ctx.clock,
                )
                .await?
            }
        };

        self.ctx
            .host
            .draw(&target, &spec.series, &spec.layout, &InteractionOptions::locked());

        // Drawing replaced the target's listeners; re-install ours.
        if let Some(widget) = self.weak_self.upgrade() {
            self.ctx
                .host
                .watch_range(&target, widget as Arc<dyn RangeListener>);
        }
        Ok(())
    }
}

impl ControlListener for ChartWidget {
    fn period_selected(&self, token: &str) {
        // Period buttons are global: every registered widget changes in
        // lock-step, including this one.
        if let Some(registry) = self.registry.upgrade() {
            registry.broadcast(token);
        }
    }

    fn zoom_requested(&self) {
        self.pop_out();
    }
}

impl RangeListener for ChartWidget {
    fn range_changed(&self, lower: DateTime<Utc>, upper: DateTime<Utc>) {
        // Interactive zoom is local: adopt the drawn bounds and re-render
        // only this widget. Overlapping renders race; the later response
        // wins.
        *self.range.lock() = TimeRange::between(lower, upper);
        self.spawn_render();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared mock host/source for widget tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::chart::{
        ChartHost, ControlBar, ControlListener, InteractionOptions, Layout, RangeListener, Series,
    };
    use crate::data::TimeRange;
    use crate::query::{
        AvgSample, FunnelHistory, FunnelScope, LatencySample, QueryError, TelemetrySource,
        ThroughputSample, UsageSample,
    };

    /// One recorded draw call.
    #[derive(Clone)]
    pub struct DrawCall {
        pub target: String,
        pub series: Vec<Series>,
        pub layout: Layout,
        pub options: InteractionOptions,
    }

    /// Host that records every call and exposes installed listeners.
    #[derive(Default)]
    pub struct RecordingHost {
        pub draws: Mutex<Vec<DrawCall>>,
        pub loading: Mutex<Vec<String>>,
        pub controls: Mutex<HashMap<String, Arc<dyn ControlListener>>>,
        pub range_listeners: Mutex<HashMap<String, Arc<dyn RangeListener>>>,
    }

    impl RecordingHost {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn draw_count(&self) -> usize {
            self.draws.lock().len()
        }

        pub fn last_draw(&self) -> Option<DrawCall> {
            self.draws.lock().last().cloned()
        }
    }

    impl ChartHost for RecordingHost {
        fn draw(
            &self,
            target: &str,
            series: &[Series],
            layout: &Layout,
            options: &InteractionOptions,
        ) {
            // Drawing replaces the target's content and listeners.
            self.range_listeners.lock().remove(target);
            self.draws.lock().push(DrawCall {
                target: target.to_string(),
                series: series.to_vec(),
                layout: layout.clone(),
                options: options.clone(),
            });
        }

        fn show_loading(&self, target: &str) {
            self.loading.lock().push(target.to_string());
        }

        fn mount_control_bar(
            &self,
            container: &str,
            _bar: &ControlBar,
            listener: Arc<dyn ControlListener>,
        ) {
            self.controls.lock().insert(container.to_string(), listener);
        }

        fn watch_range(&self, target: &str, listener: Arc<dyn RangeListener>) {
            self.range_listeners.lock().insert(target.to_string(), listener);
        }
    }

    /// Source returning canned data and counting calls per endpoint family.
    #[derive(Default)]
    pub struct CannedSource {
        pub calls: AtomicUsize,
        pub last_range: Mutex<Option<TimeRange>>,
        pub funnel: Mutex<Option<FunnelHistory>>,
    }

    impl CannedSource {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self, range: &TimeRange) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_range.lock() = Some(range.clone());
        }
    }

    #[async_trait]
    impl TelemetrySource for CannedSource {
        async fn latency_site(
            &self,
            _site: &str,
            range: &TimeRange,
        ) -> Result<Vec<LatencySample>, QueryError> {
            self.record(range);
            Ok(vec![LatencySample {
                date: "2023-06-01T12:00:00Z".to_string(),
                avg: 10.0,
                min: 5.0,
                max: 20.0,
            }])
        }

        async fn ap_frequency(
            &self,
            _site: &str,
            range: &TimeRange,
        ) -> Result<Vec<AvgSample>, QueryError> {
            self.record(range);
            Ok(Vec::new())
        }

        async fn ap_noise(
            &self,
            _site: &str,
            range: &TimeRange,
        ) -> Result<Vec<AvgSample>, QueryError> {
            self.record(range);
            Ok(Vec::new())
        }

        async fn signal(
            &self,
            _site: &str,
            range: &TimeRange,
        ) -> Result<Vec<AvgSample>, QueryError> {
            self.record(range);
            Ok(Vec::new())
        }

        async fn site_bandwidth(
            &self,
            _site: &str,
            range: &TimeRange,
        ) -> Result<Vec<ThroughputSample>, QueryError> {
            self.record(range);
            Ok(vec![ThroughputSample {
                time: "2023-06-01T12:00:00Z".to_string(),
                up: 1.0,
                down: 2.0,
            }])
        }

        async fn site_drops(
            &self,
            _site: &str,
            range: &TimeRange,
        ) -> Result<Vec<ThroughputSample>, QueryError> {
            self.record(range);
            Ok(Vec::new())
        }

        async fn site_funnel(
            &self,
            _node: &str,
            range: &TimeRange,
            _scope: FunnelScope,
        ) -> Result<FunnelHistory, QueryError> {
            self.record(range);
            Ok(self
                .funnel
                .lock()
                .clone()
                .unwrap_or(FunnelHistory { sites: Vec::new() }))
        }

        async fn cpu_load(&self) -> Result<Vec<UsageSample>, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![UsageSample { usage: 12.5 }, UsageSample { usage: 50.0 }])
        }

        async fn ram_use(&self) -> Result<Vec<UsageSample>, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![UsageSample { usage: 0.25 }])
        }

        async fn swap_use(&self) -> Result<Vec<UsageSample>, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![UsageSample { usage: 0.1 }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{CannedSource, RecordingHost};
    use super::*;
    use crate::chart::Fill;
    use crate::data::LocalClock;
    use chrono::TimeZone;

    fn context(host: Arc<RecordingHost>, source: Arc<CannedSource>) -> WidgetContext {
        WidgetContext {
            host,
            source,
            clock: LocalClock::fixed(0),
            tasks: Handle::current(),
        }
    }

    #[tokio::test]
    async fn construction_mounts_controls_and_shows_loading() {
        let host = RecordingHost::new();
        let source = CannedSource::new();
        let registry = WidgetRegistry::new(Handle::current());

        let widget = ChartWidget::new(
            context(host.clone(), source),
            "latency",
            "site-1",
            ChartKind::Latency,
            "1h",
            &registry,
            true,
        );

        assert_eq!(widget.render_target(), "latency_g");
        assert_eq!(host.loading.lock().as_slice(), ["latency_g"]);
        assert!(host.controls.lock().contains_key("latency"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn render_draws_locked_chart_and_reinstalls_range_listener() {
        let host = RecordingHost::new();
        let source = CannedSource::new();
        let registry = WidgetRegistry::new(Handle::current());

        let widget = ChartWidget::new(
            context(host.clone(), source.clone()),
            "latency",
            "site-1",
            ChartKind::Latency,
            "24h",
            &registry,
            true,
        );

        widget.render().await.unwrap();

        let draw = host.last_draw().unwrap();
        assert_eq!(draw.target, "latency_g");
        assert_eq!(draw.series.len(), 3);
        assert_eq!(draw.options, InteractionOptions::locked());
        assert_eq!(draw.series[1].style.fill, Fill::ToNext);
        assert!(host.range_listeners.lock().contains_key("latency_g"));
        assert_eq!(
            source.last_range.lock().clone().unwrap().range_param(),
            "start: -24h"
        );
    }

    #[tokio::test]
    async fn interactive_zoom_rerenders_with_explicit_range() {
        let host = RecordingHost::new();
        let source = CannedSource::new();
        let registry = WidgetRegistry::new(Handle::current());

        let widget = ChartWidget::new(
            context(host.clone(), source.clone()),
            "bw",
            "site-1",
            ChartKind::Bandwidth,
            "1h",
            &registry,
            true,
        );
        widget.render().await.unwrap();

        let lower = chrono::Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
        let upper = chrono::Utc.with_ymd_and_hms(2023, 6, 1, 13, 0, 0).unwrap();
        let listener = host.range_listeners.lock().get("bw_g").cloned().unwrap();
        listener.range_changed(lower, upper);

        // The spawned render is asynchronous; wait for it to land.
        for _ in 0..50 {
            if host.draw_count() >= 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        assert_eq!(host.draw_count(), 2);
        let range = widget.current_range();
        assert!(range.is_explicit());
        assert_eq!(range.bucket_param(), "1m");
        assert_eq!(
            source.last_range.lock().clone().unwrap().range_param(),
            "start: 2023-06-01T12:00:00.000Z, stop: 2023-06-01T13:00:00.000Z"
        );
    }

    #[tokio::test]
    async fn period_button_broadcasts_to_every_registered_widget() {
        let host = RecordingHost::new();
        let source = CannedSource::new();
        let registry = WidgetRegistry::new(Handle::current());
        let ctx = context(host.clone(), source.clone());

        let a = ChartWidget::new(
            ctx.clone(),
            "a",
            "site-1",
            ChartKind::Bandwidth,
            "1h",
            &registry,
            true,
        );
        let _b = ChartWidget::new(
            ctx,
            "b",
            "site-1",
            ChartKind::Drops,
            "1h",
            &registry,
            true,
        );

        let bar_listener = host.controls.lock().get("a").cloned().unwrap();
        bar_listener.period_selected("7d");

        // Both widgets adopt the token immediately, before renders resolve.
        assert_eq!(a.current_range(), TimeRange::resolve("7d"));
        for _ in 0..50 {
            if host.draw_count() >= 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(host.draw_count(), 2);
        // Loading placeholders were shown for both before any draw: two at
        // construction, two at broadcast.
        assert_eq!(host.loading.lock().len(), 4);
    }

    #[tokio::test]
    async fn zoom_trigger_retargets_to_the_modal() {
        let host = RecordingHost::new();
        let source = CannedSource::new();
        let registry = WidgetRegistry::new(Handle::current());

        let widget = ChartWidget::new(
            context(host.clone(), source),
            "lat",
            "site-1",
            ChartKind::Latency,
            "1h",
            &registry,
            true,
        );

        let bar_listener = host.controls.lock().get("lat").cloned().unwrap();
        bar_listener.zoom_requested();

        for _ in 0..80 {
            if widget.render_target() == MODAL_TARGET && host.draw_count() >= 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        assert_eq!(widget.render_target(), MODAL_TARGET);
        let draw = host.last_draw().unwrap();
        assert_eq!(draw.target, MODAL_TARGET);
    }

    #[tokio::test]
    async fn funnel_kind_renders_attached_history_without_fetching() {
        let host = RecordingHost::new();
        let source = CannedSource::new();
        let registry = WidgetRegistry::new(Handle::current());

        let widget = ChartWidget::new(
            context(host.clone(), source.clone()),
            "funnel_down",
            "root",
            ChartKind::FunnelDown,
            "1h",
            &registry,
            false,
        );

        widget.attach_history(FunnelHistory {
            sites: vec![(
                "Tower A".to_string(),
                vec![crate::query::ThroughputSample {
                    time: "2023-06-01T12:00:00Z".to_string(),
                    up: 1.0,
                    down: 9.0,
                }],
            )],
        });
        widget.render().await.unwrap();

        assert_eq!(source.call_count(), 0);
        let draw = host.last_draw().unwrap();
        assert_eq!(draw.series.len(), 1);
        assert_eq!(draw.series[0].points[0].y, 9.0);
    }

    #[tokio::test]
    async fn funnel_kind_without_history_draws_an_empty_chart() {
        let host = RecordingHost::new();
        let source = CannedSource::new();
        let registry = WidgetRegistry::new(Handle::current());

        let widget = ChartWidget::new(
            context(host.clone(), source.clone()),
            "funnel_up",
            "root",
            ChartKind::FunnelUp,
            "1h",
            &registry,
            false,
        );

        // No attach_history before the first render.
        widget.render().await.unwrap();

        assert_eq!(source.call_count(), 0);
        let draw = host.last_draw().unwrap();
        assert!(draw.series.is_empty());
        assert_eq!(draw.layout.y_axis.title, "Mbps");
    }
}
