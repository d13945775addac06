//! Terminal rendering: the [`TuiHost`] chart surface, panel drawing, and
//! shared chrome (header, period bar, status bar, help).

pub mod chart_view;
pub mod common;
mod host;
mod theme;

pub use host::{DrawnChart, HostedContent, TuiHost};
pub use theme::Theme;
