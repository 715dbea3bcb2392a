//! Host-side service implementations
//! 
//! This module contains the in-process host that answers the controller's
//! messages and the sink that renders the controller's output into the
//! shared view model.

pub mod local_host;
pub mod status_sink;

// Re-export main types
pub use local_host::LocalHost;
pub use status_sink::StatusSink;
