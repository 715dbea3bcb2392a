//! Presentation capability driven by the countdown controller

use crate::state::{Phase, RunState};

/// Everything the controller shows goes through this trait; the controller
/// owns no rendering logic itself.
pub trait PresentationSink: Send + Sync {
    /// Start-of-run look: buttons, mute state, cleared styles
    fn reset(&self);

    /// Style and instruction text for a phase
    fn set_phase_style(&self, phase: Phase);

    fn set_remaining_text(&self, text: &str);

    fn set_elapsed_text(&self, text: &str);

    /// Restart the progress animation for a new second
    fn restart_progress(&self);

    /// Play the audible cue once
    fn trigger_cue(&self);

    /// Terminal look with the restart affordance
    fn show_complete(&self);

    /// Observe every run state change
    fn publish(&self, state: &RunState) {
        let _ = state;
    }
}
