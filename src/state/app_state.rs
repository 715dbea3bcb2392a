//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{DisplayState, RunState, TimerSettings};
use crate::timer::{HostMessage, PauseHandle, TICK_PERIOD};

/// Shared state between the countdown task, the host side and the HTTP controls
#[derive(Debug)]
pub struct AppState {
    /// What the countdown window currently shows
    pub display: Arc<Mutex<DisplayState>>,
    /// Latest run snapshot published by the controller
    pub run_state: Arc<Mutex<RunState>>,
    /// Settings of the most recent run, re-sent on restart
    pub settings: Arc<Mutex<Option<TimerSettings>>>,
    /// Host audio mute flag
    pub muted: Arc<Mutex<bool>>,
    /// Ring the terminal bell on each cue
    pub bell: bool,
    pub tick_period: Duration,
    /// Pause state shared with the controller
    pub pause: PauseHandle,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Host → controller messages
    pub host_tx: broadcast::Sender<HostMessage>,
    /// Channel for run state updates
    pub run_update_tx: watch::Sender<RunState>,
    /// Keep the receiver alive to prevent channel closure
    pub _run_update_rx: watch::Receiver<RunState>,
    /// Whether the host's pause window is open
    pub pause_window_tx: watch::Sender<bool>,
    /// Set once an exit has been requested
    pub exit_tx: watch::Sender<bool>,
}

impl AppState {
    /// Create a new AppState with default values
    pub fn new(port: u16, host: String) -> Self {
        let (host_tx, _) = broadcast::channel(16);
        let (run_update_tx, run_update_rx) = watch::channel(RunState::new());
        let (pause_window_tx, _) = watch::channel(false);
        let (exit_tx, _) = watch::channel(false);

        Self {
            display: Arc::new(Mutex::new(DisplayState::new())),
            run_state: Arc::new(Mutex::new(RunState::new())),
            settings: Arc::new(Mutex::new(None)),
            muted: Arc::new(Mutex::new(false)),
            bell: false,
            tick_period: TICK_PERIOD,
            pause: PauseHandle::new(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            host_tx,
            run_update_tx,
            _run_update_rx: run_update_rx,
            pause_window_tx,
            exit_tx,
        }
    }

    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    pub fn with_muted(self, muted: bool) -> Self {
        if let Ok(mut flag) = self.muted.lock() {
            *flag = muted;
        }
        if let Ok(mut display) = self.display.lock() {
            display.set_muted(muted);
        }
        self
    }

    /// Remember the last action for the status endpoint
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get a copy of the view model
    pub fn get_display(&self) -> Result<DisplayState, String> {
        self.display.lock()
            .map(|display| display.clone())
            .map_err(|e| format!("Failed to lock display state: {}", e))
    }

    /// Apply a change to the view model
    pub fn update_display<F>(&self, updater: F) -> Result<DisplayState, String>
    where
        F: FnOnce(&mut DisplayState),
    {
        let mut display = self.display.lock()
            .map_err(|e| format!("Failed to lock display state: {}", e))?;

        updater(&mut *display);
        Ok(display.clone())
    }

    /// Get current run state
    pub fn get_run_state(&self) -> Result<RunState, String> {
        self.run_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock run state: {}", e))
    }

    /// Store a run snapshot and notify watchers
    pub fn update_run_state(&self, new_state: RunState) -> Result<(), String> {
        let mut run_state = self.run_state.lock()
            .map_err(|e| format!("Failed to lock run state: {}", e))?;

        *run_state = new_state.clone();
        drop(run_state); // Release the lock early

        if let Err(e) = self.run_update_tx.send(new_state) {
            warn!("Failed to send run state update: {}", e);
        }

        Ok(())
    }

    pub fn is_muted(&self) -> Result<bool, String> {
        self.muted.lock()
            .map(|muted| *muted)
            .map_err(|e| format!("Failed to lock mute flag: {}", e))
    }

    /// Set the host mute flag and swap the mute buttons
    pub fn set_muted(&self, muted: bool) -> Result<DisplayState, String> {
        info!("Setting muted to: {}", muted);
        {
            let mut flag = self.muted.lock()
                .map_err(|e| format!("Failed to lock mute flag: {}", e))?;
            *flag = muted;
        }

        self.record_action(if muted { "mute" } else { "unmute" });
        self.update_display(|display| display.set_muted(muted))
    }

    /// Settings of the most recent run
    pub fn last_settings(&self) -> Result<Option<TimerSettings>, String> {
        self.settings.lock()
            .map(|settings| *settings)
            .map_err(|e| format!("Failed to lock settings: {}", e))
    }

    pub fn remember_settings(&self, settings: TimerSettings) -> Result<(), String> {
        let mut current = self.settings.lock()
            .map_err(|e| format!("Failed to lock settings: {}", e))?;
        *current = Some(settings);
        Ok(())
    }

    /// Deliver `start-timer` to the countdown task
    pub fn start_timer(&self, settings: TimerSettings) -> Result<(), String> {
        info!(
            "Sending start-timer: duration={}s, breakDuration={}s, numRepeats={}",
            settings.duration, settings.break_duration, settings.num_repeats
        );
        self.record_action("start-timer");
        self.host_tx.send(HostMessage::StartTimer(settings))
            .map(|receivers| debug!("start-timer delivered to {} receivers", receivers))
            .map_err(|e| format!("Failed to send start-timer: {}", e))
    }

    /// Open or close the host's pause window
    pub fn set_pause_window(&self, open: bool) {
        debug!("Pause window {}", if open { "opened" } else { "closed" });
        self.pause_window_tx.send_replace(open);
    }

    pub fn is_pause_window_open(&self) -> bool {
        *self.pause_window_tx.borrow()
    }

    /// Ask the process to shut down
    pub fn request_exit(&self) {
        info!("Exit requested");
        self.record_action("exit");
        self.exit_tx.send_replace(true);
    }

    pub fn exit_requested(&self) -> bool {
        *self.exit_tx.borrow()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string())
    }

    #[test]
    fn test_with_muted_swaps_buttons() {
        let state = test_state().with_muted(true);

        assert!(state.is_muted().unwrap());
        let display = state.get_display().unwrap();
        assert!(display.buttons.mute_off);
        assert!(!display.buttons.mute_on);
    }

    #[test]
    fn test_set_muted_records_action() {
        let state = test_state();
        state.set_muted(true).unwrap();
        state.set_muted(false).unwrap();

        assert!(!state.is_muted().unwrap());
        assert_eq!(state.get_last_action().0.as_deref(), Some("unmute"));
    }

    #[test]
    fn test_start_timer_reaches_subscribers() {
        let state = test_state();
        let mut rx = state.host_tx.subscribe();
        let settings = TimerSettings::new(10, 5, 2);

        state.start_timer(settings).unwrap();

        assert_eq!(rx.try_recv().unwrap(), HostMessage::StartTimer(settings));
    }

    #[test]
    fn test_start_timer_without_subscribers_fails() {
        let state = test_state();
        assert!(state.start_timer(TimerSettings::new(1, 1, 1)).is_err());
    }

    #[test]
    fn test_update_run_state_notifies_watchers() {
        let state = test_state();
        let rx = state.run_update_tx.subscribe();
        let snapshot = RunState::starting(3);

        state.update_run_state(snapshot.clone()).unwrap();

        assert_eq!(*rx.borrow(), snapshot);
        assert_eq!(state.get_run_state().unwrap(), snapshot);
    }

    #[test]
    fn test_exit_and_pause_window_flags() {
        let state = test_state();
        assert!(!state.exit_requested());
        assert!(!state.is_pause_window_open());

        state.set_pause_window(true);
        state.request_exit();

        assert!(state.exit_requested());
        assert!(state.is_pause_window_open());
    }
}
