//! Pause/resume handshake state

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use super::channel::{HostChannel, HostError, HostMessage};

/// Where the pause handshake currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseState {
    #[default]
    Running,
    /// Pause signalled, the tick loop has not picked it up yet
    PauseRequested,
    /// The tick loop is blocked on a `pause-wait` reply
    AwaitingResume,
}

/// Shared handle onto a controller's pause state.
///
/// The controller owns the state; clones of the handle let a UI signal a
/// pause while a run is in progress.
#[derive(Debug, Clone, Default)]
pub struct PauseHandle {
    state: Arc<Mutex<PauseState>>,
}

impl PauseHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PauseState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True while any pause request is outstanding
    pub fn is_paused(&self) -> bool {
        self.state() != PauseState::Running
    }

    /// Signal a pause and tell the host about it.
    ///
    /// Returns `false` without notifying anyone if a pause is already
    /// outstanding.
    pub async fn request(&self, host: &dyn HostChannel) -> Result<bool, HostError> {
        if !self.mark_requested() {
            debug!("Pause already outstanding, ignoring request");
            return Ok(false);
        }

        info!("Pause requested");
        host.notify(HostMessage::Pause).await?;
        Ok(true)
    }

    /// `Running` → `PauseRequested`; false if a pause was already outstanding
    pub fn mark_requested(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == PauseState::Running {
            *state = PauseState::PauseRequested;
            true
        } else {
            false
        }
    }

    /// Enter `AwaitingResume` before issuing `pause-wait`.
    ///
    /// Returns `false` if the pause was already resumed, in which case no
    /// wait must be issued.
    pub(crate) fn begin_wait(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == PauseState::Running {
            false
        } else {
            *state = PauseState::AwaitingResume;
            true
        }
    }

    /// Resume confirmation from the host side.
    ///
    /// Clears an outstanding pause whether or not the tick loop has picked
    /// it up yet. Returns `false` if nothing was paused.
    pub fn resume(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let was_paused = *state != PauseState::Running;
        *state = PauseState::Running;
        was_paused
    }

    /// Apply the host's reply: `true` keeps waiting, `false` resumes
    pub(crate) fn resolve(&self, still_paused: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = if still_paused {
            PauseState::AwaitingResume
        } else {
            PauseState::Running
        };
    }

    /// Drop any outstanding pause, used when a new run starts
    pub fn reset(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = PauseState::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_requested_is_idempotent() {
        let pause = PauseHandle::new();
        assert!(pause.mark_requested());
        assert!(!pause.mark_requested());
        assert_eq!(pause.state(), PauseState::PauseRequested);
    }

    #[test]
    fn test_request_ignored_while_awaiting_resume() {
        let pause = PauseHandle::new();
        pause.mark_requested();
        pause.begin_wait();

        assert!(!pause.mark_requested());
        assert_eq!(pause.state(), PauseState::AwaitingResume);
    }

    #[test]
    fn test_resolve() {
        let pause = PauseHandle::new();
        pause.mark_requested();
        pause.begin_wait();

        pause.resolve(true);
        assert!(pause.is_paused());

        pause.resolve(false);
        assert!(!pause.is_paused());
        assert_eq!(pause.state(), PauseState::Running);
    }

    #[test]
    fn test_resume_before_wait_cancels_the_pause() {
        let pause = PauseHandle::new();
        pause.mark_requested();

        assert!(pause.resume());
        assert!(!pause.begin_wait());
        assert_eq!(pause.state(), PauseState::Running);
        assert!(!pause.resume());
    }

    #[test]
    fn test_resume_while_awaiting() {
        let pause = PauseHandle::new();
        pause.mark_requested();
        assert!(pause.begin_wait());

        assert!(pause.resume());
        assert!(!pause.is_paused());
        assert!(pause.mark_requested());
    }

    #[test]
    fn test_clones_share_state() {
        let pause = PauseHandle::new();
        let ui = pause.clone();
        ui.mark_requested();

        assert!(pause.is_paused());
        pause.reset();
        assert!(!ui.is_paused());
    }
}
