//! Axis, margin and interaction configuration for drawn charts.

use serde::{Deserialize, Serialize};

/// Axis configuration. Titles render small and auto-margined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

/// Chart margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub left: u16,
    pub right: u16,
    pub bottom: u16,
    pub top: u16,
    pub pad: u16,
}

impl Margin {
    /// The tight margin every dashboard chart uses.
    pub fn tight() -> Self {
        Self {
            left: 0,
            right: 0,
            bottom: 0,
            top: 0,
            pad: 4,
        }
    }
}

/// Layout options passed to [`ChartHost::draw`](super::ChartHost::draw).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub show_legend: bool,
    pub y_axis: Axis,
    pub x_axis: Axis,
    pub margin: Margin,
}

impl Layout {
    /// Standard time-chart layout: hidden legend, y axis titled with the
    /// unit, x axis titled "Date/Time", tight margins.
    pub fn for_unit(unit: &str) -> Self {
        Self {
            show_legend: false,
            y_axis: Axis::titled(unit),
            x_axis: Axis::titled("Date/Time"),
            margin: Margin::tight(),
        }
    }

    /// Gauge layout: legend visible, y axis titled, no x axis title.
    pub fn gauge(unit: &str) -> Self {
        Self {
            show_legend: true,
            y_axis: Axis::titled(unit),
            x_axis: Axis::titled(""),
            margin: Margin::tight(),
        }
    }
}

/// Built-in host interactions that can be switched off per draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartControl {
    BoxZoom,
    Pan,
    Select,
    Lasso,
    ZoomIn,
    ZoomOut,
    Autoscale,
    ResetScale,
}

/// Every built-in zoom/pan affordance. The control bar's period buttons are
/// the only supported way to change a chart's window, so all widgets stay
/// explainable and consistent.
pub const LOCKED_CONTROLS: [ChartControl; 8] = [
    ChartControl::BoxZoom,
    ChartControl::Pan,
    ChartControl::Select,
    ChartControl::Lasso,
    ChartControl::ZoomIn,
    ChartControl::ZoomOut,
    ChartControl::Autoscale,
    ChartControl::ResetScale,
];

/// Interaction options passed to [`ChartHost::draw`](super::ChartHost::draw).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOptions {
    /// Resize with the container.
    pub responsive: bool,
    pub disabled_controls: Vec<ChartControl>,
}

impl InteractionOptions {
    /// The fixed dashboard configuration: responsive, all built-in zoom and
    /// pan controls disabled.
    pub fn locked() -> Self {
        Self {
            responsive: true,
            disabled_controls: LOCKED_CONTROLS.to_vec(),
        }
    }

    /// Responsive with the host's own controls left enabled (gauges).
    pub fn open() -> Self {
        Self {
            responsive: true,
            disabled_controls: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_interactions_disable_all_eight_controls() {
        let options = InteractionOptions::locked();
        assert!(options.responsive);
        assert_eq!(options.disabled_controls.len(), 8);
        assert!(options.disabled_controls.contains(&ChartControl::BoxZoom));
        assert!(options.disabled_controls.contains(&ChartControl::ResetScale));
    }

    #[test]
    fn time_chart_layout_hides_legend() {
        let layout = Layout::for_unit("Mbps");
        assert!(!layout.show_legend);
        assert_eq!(layout.y_axis.title, "Mbps");
        assert_eq!(layout.x_axis.title, "Date/Time");
        assert_eq!(layout.margin, Margin::tight());
    }
}
