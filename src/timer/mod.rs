//! Countdown core
//!
//! The controller, its formatting helpers, and the capabilities it depends
//! on: a host channel, a presentation sink, and a clock.

pub mod channel;
pub mod clock;
pub mod controller;
pub mod format;
pub mod pause;
pub mod presentation;

// Re-export main types
pub use channel::{HostChannel, HostError, HostMessage};
pub use clock::{Clock, TokioClock, TICK_PERIOD};
pub use controller::{IntervalCountdownController, TimerError};
pub use format::{format_elapsed, format_remaining, parse_elapsed};
pub use pause::{PauseHandle, PauseState};
pub use presentation::PresentationSink;
