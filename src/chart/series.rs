//! Series value types handed to a [`ChartHost`](super::ChartHost).
//!
//! A series is an ordered list of (x label, y value) points plus enough
//! styling for the host to pick a visual shape. X values are the already
//! localized timestamp strings; hosts treat them as opaque labels and may
//! parse them back for numeric axes.

use serde::{Deserialize, Serialize};

/// How the host should draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    /// Connected line (the default for time charts).
    Lines,
    /// One bar per point (CPU core gauge).
    Bars,
    /// Proportional segments; x is the segment label (RAM/swap gauges).
    Pie,
}

/// Area fill behavior for line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    None,
    /// Fill down to the zero line.
    ToZero,
    /// Fill to the previously drawn series (shaded bands).
    ToNext,
}

/// Visual configuration for one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub mode: DrawMode,
    pub fill: Fill,
    /// CSS-style fill color, when `fill` is not `None`.
    pub fill_color: Option<String>,
    /// Line color; `Some("transparent")` hides the line (band edges).
    pub line_color: Option<String>,
    /// Series sharing a stack group are stacked cumulatively.
    pub stack_group: Option<String>,
}

impl SeriesStyle {
    pub fn line() -> Self {
        Self {
            mode: DrawMode::Lines,
            fill: Fill::None,
            fill_color: None,
            line_color: None,
            stack_group: None,
        }
    }

    pub fn line_colored(color: impl Into<String>) -> Self {
        Self {
            line_color: Some(color.into()),
            ..Self::line()
        }
    }

    /// Band edge: filled to the previous series, edge line hidden.
    pub fn band(fill_color: impl Into<String>) -> Self {
        Self {
            fill: Fill::ToNext,
            fill_color: Some(fill_color.into()),
            line_color: Some("transparent".to_string()),
            ..Self::line()
        }
    }

    /// Area filled down to zero.
    pub fn area() -> Self {
        Self {
            fill: Fill::ToZero,
            ..Self::line()
        }
    }

    /// Area filled down to zero with an explicit fill color.
    pub fn area_colored(fill_color: impl Into<String>) -> Self {
        Self {
            fill_color: Some(fill_color.into()),
            ..Self::area()
        }
    }

    /// Member of a cumulative stack.
    pub fn stacked(group: impl Into<String>) -> Self {
        Self {
            stack_group: Some(group.into()),
            ..Self::line()
        }
    }

    pub fn bars() -> Self {
        Self {
            mode: DrawMode::Bars,
            ..Self::line()
        }
    }

    pub fn pie() -> Self {
        Self {
            mode: DrawMode::Pie,
            ..Self::line()
        }
    }
}

/// One plotted point: localized timestamp label and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: String,
    pub y: f64,
}

/// A named, styled sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
    pub style: SeriesStyle,
}

impl Series {
    pub fn new(name: impl Into<String>, style: SeriesStyle) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
            style,
        }
    }

    pub fn push(&mut self, x: impl Into<String>, y: f64) {
        self.points.push(SeriesPoint { x: x.into(), y });
    }
}
