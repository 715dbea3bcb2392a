//! State management module
//! 
//! This module contains the run snapshot, the window view model, the timer
//! settings and the shared application state that ties them together.

pub mod app_state;
pub mod display_state;
pub mod run_state;
pub mod settings;

// Re-export main types
pub use app_state::AppState;
pub use display_state::DisplayState;
pub use run_state::{Phase, RunState};
pub use settings::TimerSettings;
