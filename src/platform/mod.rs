//! Platform abstraction layer
//!
//! Keeps the frame loop independent of where time and input come from:
//! - Time: a monotonic millisecond clock (`SystemClock`, or `ManualClock` in tests)
//! - Input: anything that can be polled for the currently held controls

pub mod input;
pub mod time;

pub use input::{Autopilot, InputSource};
pub use time::{Clock, ManualClock, SystemClock, time_seed};
