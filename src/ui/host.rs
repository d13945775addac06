//! Terminal implementation of the [`ChartHost`] contract.
//!
//! `TuiHost` does not paint anything itself: it keeps the latest hosted
//! state per render target (loading placeholder or drawn chart) for the
//! draw loop to read, and routes control-bar presses and synthetic range
//! events back into the widget layer, the way a browser host would route
//! button clicks and relayout events.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::chart::{
    ChartHost, ControlBar, ControlListener, InteractionOptions, Layout, RangeListener, Series,
};

/// A fully specified drawn chart, as handed to [`ChartHost::draw`].
#[derive(Debug, Clone)]
pub struct DrawnChart {
    pub series: Vec<Series>,
    pub layout: Layout,
    pub options: InteractionOptions,
}

/// What a render target currently shows.
#[derive(Debug, Clone)]
pub enum HostedContent {
    /// Loading placeholder (spinner equivalent).
    Loading,
    Chart(DrawnChart),
}

/// Chart host backed by terminal panels.
#[derive(Default)]
pub struct TuiHost {
    content: Mutex<HashMap<String, HostedContent>>,
    bars: Mutex<HashMap<String, ControlBar>>,
    controls: Mutex<HashMap<String, Arc<dyn ControlListener>>>,
    range_listeners: Mutex<HashMap<String, Arc<dyn RangeListener>>>,
}

impl TuiHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Current content of a render target, if anything was ever hosted.
    pub fn content(&self, target: &str) -> Option<HostedContent> {
        self.content.lock().get(target).cloned()
    }

    /// The control bar mounted on a container.
    pub fn control_bar(&self, container: &str) -> Option<ControlBar> {
        self.bars.lock().get(container).cloned()
    }

    /// Press a period button on a container's control bar.
    ///
    /// Returns false when no bar is mounted there (gauge panels).
    pub fn press_period(&self, container: &str, token: &str) -> bool {
        let listener = self.controls.lock().get(container).cloned();
        match listener {
            Some(listener) => {
                listener.period_selected(token);
                true
            }
            None => false,
        }
    }

    /// Press the zoom trigger on a container's control bar.
    pub fn request_zoom(&self, container: &str) -> bool {
        let listener = self.controls.lock().get(container).cloned();
        match listener {
            Some(listener) => {
                listener.zoom_requested();
                true
            }
            None => false,
        }
    }

    /// Deliver an interactive visible-range change for a target.
    ///
    /// Returns false when no listener is installed (target never drawn, or
    /// mid-redraw).
    pub fn emit_range_change(
        &self,
        target: &str,
        lower: DateTime<Utc>,
        upper: DateTime<Utc>,
    ) -> bool {
        let listener = self.range_listeners.lock().get(target).cloned();
        match listener {
            Some(listener) => {
                listener.range_changed(lower, upper);
                true
            }
            None => false,
        }
    }
}

impl ChartHost for TuiHost {
    fn draw(&self, target: &str, series: &[Series], layout: &Layout, options: &InteractionOptions) {
        // Replacing the content drops the installed range listener, like a
        // plotting library rebuilding its container; the widget re-installs
        // its listener after every draw.
        self.range_listeners.lock().remove(target);
        self.content.lock().insert(
            target.to_string(),
            HostedContent::Chart(DrawnChart {
                series: series.to_vec(),
                layout: layout.clone(),
                options: options.clone(),
            }),
        );
    }

    fn show_loading(&self, target: &str) {
        self.content
            .lock()
            .insert(target.to_string(), HostedContent::Loading);
    }

    fn mount_control_bar(
        &self,
        container: &str,
        bar: &ControlBar,
        listener: Arc<dyn ControlListener>,
    ) {
        self.bars.lock().insert(container.to_string(), bar.clone());
        self.controls.lock().insert(container.to_string(), listener);
    }

    fn watch_range(&self, target: &str, listener: Arc<dyn RangeListener>) {
        self.range_listeners
            .lock()
            .insert(target.to_string(), listener);
    }
}
