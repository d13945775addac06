//! The charting-surface contract.
//!
//! The dashboard never talks to a plotting library directly. Everything it
//! needs is behind [`ChartHost`]: draw (or replace) a chart in a named
//! target, show a loading placeholder, mount a control bar, and deliver
//! interactive range changes back through a [`RangeListener`].
//!
//! The crate ships one host, [`TuiHost`](crate::ui::TuiHost), which renders
//! into terminal rects; a browser build would implement this same trait over
//! its plotting library.

mod layout;
mod series;

pub use layout::{Axis, ChartControl, InteractionOptions, Layout, Margin, LOCKED_CONTROLS};
pub use series::{DrawMode, Fill, Series, SeriesPoint, SeriesStyle};

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::data::BUTTON_TOKENS;

/// Receives presses from a mounted control bar.
pub trait ControlListener: Send + Sync {
    /// A named period button was pressed. Implementations broadcast; a
    /// period button never changes just one chart.
    fn period_selected(&self, token: &str);

    /// The zoom (modal pop-out) trigger was pressed.
    fn zoom_requested(&self);
}

/// Receives interactive visible-range changes for one chart target.
pub trait RangeListener: Send + Sync {
    /// The user panned/zoomed the chart to `[lower, upper]`.
    fn range_changed(&self, lower: DateTime<Utc>, upper: DateTime<Utc>);
}

/// One button on a chart's control bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodButton {
    pub label: String,
    pub token: String,
}

/// The control bar mounted above every time chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBar {
    pub buttons: Vec<PeriodButton>,
    /// Whether the modal pop-out trigger is present.
    pub zoom_trigger: bool,
}

impl ControlBar {
    /// The standard bar: one button per exposed period token plus the zoom
    /// trigger.
    pub fn standard() -> Self {
        Self {
            buttons: BUTTON_TOKENS
                .iter()
                .map(|token| PeriodButton {
                    label: token.to_string(),
                    token: token.to_string(),
                })
                .collect(),
            zoom_trigger: true,
        }
    }
}

/// The plotting surface the dashboard draws into.
///
/// `draw` replaces the target's previous content, including any installed
/// range listener; callers re-install theirs after every draw, mirroring
/// plotting libraries that rebuild the container's event handlers.
pub trait ChartHost: Send + Sync {
    /// Draw or replace the chart in `target`.
    fn draw(
        &self,
        target: &str,
        series: &[Series],
        layout: &Layout,
        options: &InteractionOptions,
    );

    /// Replace the target's content with a loading placeholder.
    fn show_loading(&self, target: &str);

    /// Mount a control bar on `container`, routing presses to `listener`.
    fn mount_control_bar(&self, container: &str, bar: &ControlBar, listener: Arc<dyn ControlListener>);

    /// Install the interactive range listener for `target`.
    fn watch_range(&self, target: &str, listener: Arc<dyn RangeListener>);
}
