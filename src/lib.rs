//! Station Timer - An interval timer for rotating between workout stations
//! 
//! This library provides the interval countdown controller, the pause
//! handshake with its host, and an in-process host with local HTTP controls.

pub mod config;
pub mod state;
pub mod timer;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, RunState, TimerSettings};
pub use timer::IntervalCountdownController;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
