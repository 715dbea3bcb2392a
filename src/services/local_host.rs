//! In-process host
//!
//! Plays the window manager's part: opens a pause window on `pause`, answers
//! `pause-wait` once the pause has been resumed, and turns `exit` into a
//! shutdown request.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    state::AppState,
    timer::{HostChannel, HostError, HostMessage},
};

/// Host living in the same process as the controller
#[derive(Debug, Clone)]
pub struct LocalHost {
    state: Arc<AppState>,
}

impl LocalHost {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Clear the outstanding pause and close the pause window.
    ///
    /// A pending `pause-wait` then replies false; if the tick loop has not
    /// issued one yet, it never will for this pause.
    pub fn resume(&self) -> bool {
        let was_paused = self.state.pause.resume();
        if !was_paused && !self.state.is_pause_window_open() {
            debug!("Resume ignored, nothing is paused");
            return false;
        }
        info!("Pause window closed, resuming");
        self.state.record_action("resume");
        self.state.set_pause_window(false);
        true
    }
}

#[async_trait]
impl HostChannel for LocalHost {
    async fn notify(&self, message: HostMessage) -> Result<(), HostError> {
        match message {
            HostMessage::StartTimer(settings) => {
                self.state.start_timer(settings).map_err(HostError::State)
            }
            HostMessage::Pause => {
                info!("Opening pause window");
                self.state.record_action("pause");
                self.state.set_pause_window(true);
                Ok(())
            }
            HostMessage::Exit => {
                self.state.request_exit();
                Ok(())
            }
            HostMessage::PauseWait => Err(HostError::Unsupported(message.event_name())),
        }
    }

    async fn request(&self, message: HostMessage) -> Result<Value, HostError> {
        match message {
            HostMessage::PauseWait => {
                // Every resume closes the window, which wakes this loop
                let mut window = self.state.pause_window_tx.subscribe();
                while self.state.pause.is_paused() {
                    if window.changed().await.is_err() {
                        return Err(HostError::Disconnected);
                    }
                }

                debug!("Replying to pause-wait: resumed");
                Ok(Value::Bool(false))
            }
            other => Err(HostError::Unsupported(other.event_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerSettings;
    use std::time::Duration;

    fn test_host() -> (Arc<AppState>, LocalHost) {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
        let host = LocalHost::new(Arc::clone(&state));
        (state, host)
    }

    #[tokio::test]
    async fn test_pause_opens_window() {
        let (state, host) = test_host();
        host.notify(HostMessage::Pause).await.unwrap();
        assert!(state.is_pause_window_open());
    }

    #[tokio::test]
    async fn test_pause_wait_replies_false_after_resume() {
        let (state, host) = test_host();
        assert!(state.pause.request(&host).await.unwrap());

        let waiter = {
            let host = host.clone();
            tokio::spawn(async move { host.request(HostMessage::PauseWait).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        assert!(host.resume());

        let reply = waiter.await.unwrap().unwrap();
        assert_eq!(reply, Value::Bool(false));
        assert!(!state.is_pause_window_open());
        assert!(!state.pause.is_paused());
    }

    #[tokio::test]
    async fn test_resume_before_pause_wait_is_kept() {
        let (state, host) = test_host();
        assert!(state.pause.request(&host).await.unwrap());
        assert!(host.resume());

        let reply = tokio::time::timeout(
            Duration::from_secs(1),
            host.request(HostMessage::PauseWait),
        )
        .await
        .expect("pause-wait should not block after a resume")
        .unwrap();

        assert_eq!(reply, Value::Bool(false));
        assert!(!state.pause.is_paused());
        assert!(!state.is_pause_window_open());
    }

    #[tokio::test]
    async fn test_pause_wait_ahead_of_pause_notification() {
        let (state, host) = test_host();
        assert!(state.pause.mark_requested());

        let waiter = {
            let host = host.clone();
            tokio::spawn(async move { host.request(HostMessage::PauseWait).await })
        };

        host.notify(HostMessage::Pause).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        assert!(state.is_pause_window_open());

        assert!(host.resume());
        assert_eq!(waiter.await.unwrap().unwrap(), Value::Bool(false));
    }

    #[tokio::test]
    async fn test_resume_without_window_is_ignored() {
        let (_state, host) = test_host();
        assert!(!host.resume());
    }

    #[tokio::test]
    async fn test_exit_requests_shutdown() {
        let (state, host) = test_host();
        host.notify(HostMessage::Exit).await.unwrap();
        assert!(state.exit_requested());
    }

    #[tokio::test]
    async fn test_start_timer_is_forwarded() {
        let (state, host) = test_host();
        let mut rx = state.host_tx.subscribe();
        let settings = TimerSettings::new(3, 1, 2);

        host.notify(HostMessage::StartTimer(settings)).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), HostMessage::StartTimer(settings));
    }

    #[tokio::test]
    async fn test_unsupported_directions() {
        let (_state, host) = test_host();
        assert!(matches!(
            host.notify(HostMessage::PauseWait).await,
            Err(HostError::Unsupported("pause-wait"))
        ));
        assert!(matches!(
            host.request(HostMessage::Exit).await,
            Err(HostError::Unsupported("exit"))
        ));
    }
}
