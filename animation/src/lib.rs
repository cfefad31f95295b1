//! Animates a marker along a route. The host delivers frames; the clock turns elapsed time into
//! distance traveled and tells the host where the marker should be.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod clock;
mod config;
mod host;

pub use clock::{AnimationClock, ClockState, ClockStatus};
pub use config::AnimationConfig;
pub use host::{Host, TickHandle};
