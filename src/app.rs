//! Application state and navigation logic.

use std::sync::Arc;
use std::time::Instant;

use chrono::DateTime;

use crate::data::BUTTON_TOKENS;
use crate::ui::{chart_view, HostedContent, Theme, TuiHost};
use crate::widget::WidgetRegistry;

/// Which way a pan moves the focused chart's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Back,
    Forward,
}

/// One dashboard panel: a container with a render target and a display title.
///
/// Time charts render into `{container}_g`; gauges render straight into
/// their container.
#[derive(Debug, Clone)]
pub struct Panel {
    pub container: String,
    pub target: String,
    pub title: String,
}

impl Panel {
    /// A time-chart panel.
    pub fn chart(container: impl Into<String>, title: impl Into<String>) -> Self {
        let container = container.into();
        Self {
            target: format!("{}_g", container),
            container,
            title: title.into(),
        }
    }

    /// A gauge panel (no separate graph target, no control bar).
    pub fn gauge(container: impl Into<String>, title: impl Into<String>) -> Self {
        let container = container.into();
        Self {
            target: container.clone(),
            container,
            title: title.into(),
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    /// Whether the zoom modal overlay is visible.
    pub modal_open: bool,

    pub panels: Vec<Panel>,
    pub focused: usize,

    pub host: Arc<TuiHost>,
    registry: Arc<WidgetRegistry>,

    /// The last period token selected (or the startup period).
    pub current_period: String,
    pub site: String,
    pub theme: Theme,

    // Status message (temporary feedback)
    status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        host: Arc<TuiHost>,
        registry: Arc<WidgetRegistry>,
        panels: Vec<Panel>,
        site: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            modal_open: false,
            panels,
            focused: 0,
            host,
            registry,
            current_period: period.into(),
            site: site.into(),
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Set a temporary status message shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// The current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    pub fn focused_panel(&self) -> &Panel {
        &self.panels[self.focused]
    }

    /// Move focus to the next panel, wrapping.
    pub fn next_panel(&mut self) {
        if !self.panels.is_empty() {
            self.focused = (self.focused + 1) % self.panels.len();
        }
    }

    /// Move focus to the previous panel, wrapping.
    pub fn prev_panel(&mut self) {
        if !self.panels.is_empty() {
            self.focused = (self.focused + self.panels.len() - 1) % self.panels.len();
        }
    }

    /// Index of `current_period` in the exposed button list, if it is one.
    pub fn current_period_index(&self) -> Option<usize> {
        BUTTON_TOKENS.iter().position(|t| *t == self.current_period)
    }

    /// Press the period button at `index` (0-based into the exposed tokens).
    ///
    /// The press goes through a mounted control bar, so it broadcasts to
    /// every registered widget. Prefers the focused panel's bar; gauges have
    /// none, so any chart panel's bar stands in.
    pub fn select_period(&mut self, index: usize) {
        let Some(token) = BUTTON_TOKENS.get(index) else {
            return;
        };

        let pressed = self.host.press_period(&self.focused_panel().container, token)
            || self
                .panels
                .iter()
                .any(|p| self.host.press_period(&p.container, token));

        if pressed {
            self.current_period = token.to_string();
            self.set_status_message(format!("period: {}", token));
        }
    }

    /// Pop the focused chart out into the modal.
    pub fn zoom_focused(&mut self) {
        let container = self.focused_panel().container.clone();
        if self.host.request_zoom(&container) {
            self.modal_open = true;
        } else {
            self.set_status_message("no zoom on this panel".to_string());
        }
    }

    /// Hide the modal overlay. The popped-out widget keeps rendering into
    /// the modal target; its original panel shows the last chart drawn
    /// there.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Pan the focused chart by a quarter of its drawn window, delivered as
    /// an interactive range change.
    pub fn pan_focused(&mut self, direction: PanDirection) {
        let target = self.focused_panel().target.clone();
        let Some(HostedContent::Chart(chart)) = self.host.content(&target) else {
            return;
        };

        let epochs: Vec<f64> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter_map(|p| chart_view::parse_x(&p.x))
            .collect();
        let Some(min) = epochs.iter().cloned().reduce(f64::min) else {
            return;
        };
        let max = epochs.iter().cloned().fold(min, f64::max);

        let shift = match direction {
            PanDirection::Back => -((max - min) / 4.0),
            PanDirection::Forward => (max - min) / 4.0,
        };
        let (Some(lower), Some(upper)) = (
            DateTime::from_timestamp((min + shift) as i64, 0),
            DateTime::from_timestamp((max + shift) as i64, 0),
        ) else {
            return;
        };

        if !self.host.emit_range_change(&target, lower, upper) {
            self.set_status_message("chart is redrawing, try again".to_string());
        }
    }

    /// Re-broadcast the current period, re-querying every registered widget.
    pub fn refresh(&mut self) {
        self.registry.broadcast(&self.current_period);
        self.set_status_message("refreshing".to_string());
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};
    use parking_lot::Mutex;
    use tokio::runtime::Handle;

    use crate::chart::{
        ChartHost, ControlBar, ControlListener, InteractionOptions, Layout, RangeListener, Series,
        SeriesStyle,
    };

    struct Recorder {
        periods: Mutex<Vec<String>>,
        ranges: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                periods: Mutex::new(Vec::new()),
                ranges: Mutex::new(Vec::new()),
            })
        }
    }

    impl ControlListener for Recorder {
        fn period_selected(&self, token: &str) {
            self.periods.lock().push(token.to_string());
        }

        fn zoom_requested(&self) {}
    }

    impl RangeListener for Recorder {
        fn range_changed(&self, lower: DateTime<Utc>, upper: DateTime<Utc>) {
            self.ranges.lock().push((lower, upper));
        }
    }

    fn app(host: Arc<TuiHost>, panels: Vec<Panel>) -> App {
        let registry = WidgetRegistry::new(Handle::current());
        App::new(host, registry, panels, "main", "24h")
    }

    #[tokio::test]
    async fn focus_cycles_through_panels_and_wraps() {
        let host = TuiHost::new();
        let mut app = app(
            host,
            vec![Panel::chart("a", "A"), Panel::chart("b", "B"), Panel::gauge("c", "C")],
        );

        app.next_panel();
        app.next_panel();
        assert_eq!(app.focused_panel().container, "c");
        assert_eq!(app.focused_panel().target, "c");
        app.next_panel();
        assert_eq!(app.focused_panel().container, "a");
        assert_eq!(app.focused_panel().target, "a_g");
        app.prev_panel();
        assert_eq!(app.focused_panel().container, "c");
    }

    #[tokio::test]
    async fn period_keys_fall_back_to_a_panel_with_controls() {
        let host = TuiHost::new();
        let recorder = Recorder::new();
        host.mount_control_bar("chart", &ControlBar::standard(), recorder.clone());

        // Focus starts on the gauge, which has no bar.
        let mut app = app(
            host,
            vec![Panel::gauge("cpu", "CPU"), Panel::chart("chart", "Chart")],
        );

        app.select_period(3);
        assert_eq!(recorder.periods.lock().as_slice(), ["12h"]);
        assert_eq!(app.current_period, "12h");
    }

    #[tokio::test]
    async fn pan_shifts_the_drawn_window_by_a_quarter() {
        let host = TuiHost::new();
        let recorder = Recorder::new();

        let mut series = Series::new("Average", SeriesStyle::line());
        series.push("2023-06-01T12:00:00.000Z", 1.0);
        series.push("2023-06-01T13:00:00.000Z", 2.0);
        host.draw(
            "lat_g",
            &[series],
            &Layout::for_unit("ms"),
            &InteractionOptions::locked(),
        );
        host.watch_range("lat_g", recorder.clone());

        let mut app = app(host, vec![Panel::chart("lat", "Latency")]);
        app.pan_focused(PanDirection::Forward);

        let ranges = recorder.ranges.lock();
        let (lower, upper) = ranges[0];
        assert_eq!(lower.to_rfc3339(), "2023-06-01T12:15:00+00:00");
        assert_eq!(upper.to_rfc3339(), "2023-06-01T13:15:00+00:00");
    }
}
