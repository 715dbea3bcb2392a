//! Presentation sink rendering into the shared view model

use std::{
    io::{self, Write},
    sync::Arc,
};

use tracing::{debug, error, info};

use crate::{
    state::{AppState, DisplayState, Phase, RunState},
    timer::PresentationSink,
};

/// Renders controller output into [`AppState::display`] and mirrors run
/// snapshots into [`AppState::run_state`].
#[derive(Debug, Clone)]
pub struct StatusSink {
    state: Arc<AppState>,
}

impl StatusSink {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    fn update<F>(&self, what: &str, updater: F)
    where
        F: FnOnce(&mut DisplayState),
    {
        if let Err(e) = self.state.update_display(updater) {
            error!("Failed to update display ({}): {}", what, e);
        }
    }

    fn ring_bell() {
        let mut stderr = io::stderr();
        if stderr.write_all(b"\x07").and_then(|_| stderr.flush()).is_err() {
            debug!("Could not ring terminal bell");
        }
    }
}

impl PresentationSink for StatusSink {
    fn reset(&self) {
        let muted = self.state.is_muted().unwrap_or_else(|e| {
            error!("Failed to read mute flag: {}", e);
            false
        });
        self.update("reset", |display| display.reset(muted));
    }

    fn set_phase_style(&self, phase: Phase) {
        self.update("phase", |display| display.apply_phase(phase));
    }

    fn set_remaining_text(&self, text: &str) {
        info!("{}", text);
        self.update("remaining", |display| display.remaining.text = text.to_string());
    }

    fn set_elapsed_text(&self, text: &str) {
        debug!("Counter: {}", text);
        self.update("counter", |display| display.counter.text = text.to_string());
    }

    fn restart_progress(&self) {
        self.update("progress", DisplayState::restart_progress);
    }

    fn trigger_cue(&self) {
        match self.state.is_muted() {
            Ok(true) => {
                debug!("Cue suppressed, audio muted");
                return;
            }
            Ok(false) => {}
            Err(e) => error!("Failed to read mute flag: {}", e),
        }

        self.update("cue", |display| display.cues_played += 1);
        if self.state.bell {
            Self::ring_bell();
        }
    }

    fn show_complete(&self) {
        self.update("complete", DisplayState::show_complete);
    }

    fn publish(&self, run_state: &RunState) {
        if let Err(e) = self.state.update_run_state(run_state.clone()) {
            error!("Failed to publish run state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::display_state::{CLASS_EXPAND, CLASS_RED, INFO_COOLDOWN};

    fn test_sink() -> (Arc<AppState>, StatusSink) {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
        let sink = StatusSink::new(Arc::clone(&state));
        (state, sink)
    }

    #[test]
    fn test_cue_counts_unless_muted() {
        let (state, sink) = test_sink();
        sink.trigger_cue();
        state.set_muted(true).unwrap();
        sink.trigger_cue();

        assert_eq!(state.get_display().unwrap().cues_played, 1);
    }

    #[test]
    fn test_renders_texts_and_styles() {
        let (state, sink) = test_sink();
        sink.set_phase_style(Phase::Cooldown);
        sink.set_remaining_text("Two stations remaining");
        sink.set_elapsed_text("1:05");
        sink.restart_progress();

        let display = state.get_display().unwrap();
        assert_eq!(display.info.text, INFO_COOLDOWN);
        assert_eq!(display.remaining.text, "Two stations remaining");
        assert_eq!(display.counter.text, "1:05");
        assert!(display.counter.has_class(CLASS_RED));
        assert!(display.progress.has_class(CLASS_EXPAND));
    }

    #[test]
    fn test_reset_follows_mute_flag() {
        let (state, sink) = test_sink();
        state.set_muted(true).unwrap();
        sink.show_complete();

        sink.reset();

        let display = state.get_display().unwrap();
        assert!(display.buttons.mute_off);
        assert!(display.buttons.pause);
        assert!(!display.buttons.restart);
    }

    #[test]
    fn test_publish_updates_run_state() {
        let (state, sink) = test_sink();
        let snapshot = RunState::starting(2);
        sink.publish(&snapshot);
        assert_eq!(state.get_run_state().unwrap(), snapshot);
    }
}
