//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod interval_timer;

// Re-export main functions
pub use interval_timer::{interval_timer_task, run_controller};
