//! Time-window model shared by every chart widget.
//!
//! - [`range`]: period tokens, resolved [`TimeRange`]s and their wire
//!   descriptors
//! - [`localtime`]: conversion of backend timestamps to the viewer's wall
//!   clock

pub mod localtime;
pub mod range;

pub use localtime::LocalClock;
pub use range::{Span, TimeRange, BUTTON_TOKENS, ZOOM_BUCKET};
