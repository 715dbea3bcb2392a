//! Interval countdown controller
//!
//! Drives one run of N stations, each an active countdown followed by a
//! cooldown countdown, one tick per period. The tick loop is the only place
//! a run suspends: either for the tick wait or for the pause handshake.

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::state::{Phase, RunState, TimerSettings};

use super::{
    channel::{HostChannel, HostError, HostMessage},
    clock::{Clock, TICK_PERIOD},
    format::{format_elapsed, format_remaining},
    pause::PauseHandle,
    presentation::PresentationSink,
};

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("Host channel error: {0}")]
    Host(#[from] HostError),
}

pub struct IntervalCountdownController {
    host: Arc<dyn HostChannel>,
    sink: Arc<dyn PresentationSink>,
    clock: Arc<dyn Clock>,
    period: Duration,
    pause: PauseHandle,
    state: RunState,
}

impl IntervalCountdownController {
    pub fn new(
        host: Arc<dyn HostChannel>,
        sink: Arc<dyn PresentationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            host,
            sink,
            clock,
            period: TICK_PERIOD,
            pause: PauseHandle::new(),
            state: RunState::new(),
        }
    }

    /// Use a tick period other than one second
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Share an existing pause handle, e.g. one already held by the UI
    pub fn with_pause(mut self, pause: PauseHandle) -> Self {
        self.pause = pause;
        self
    }

    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Ask for a pause; a no-op while one is already outstanding
    pub async fn request_pause(&self) -> Result<bool, TimerError> {
        Ok(self.pause.request(self.host.as_ref()).await?)
    }

    /// Run every station to completion.
    ///
    /// With zero repeats the run goes straight to `Complete`.
    pub async fn run(&mut self, settings: TimerSettings) -> Result<(), TimerError> {
        info!(
            "Starting run: {} stations, {}s active, {}s cooldown",
            settings.num_repeats, settings.duration, settings.break_duration
        );

        self.pause.reset();
        self.state = RunState::starting(settings.num_repeats);
        self.sink.reset();
        self.publish();

        for stations in (1..=settings.num_repeats).rev() {
            self.set_stations_remaining(stations);

            self.enter_phase(Phase::Active);
            self.countdown(settings.duration).await?;

            self.enter_phase(Phase::Cooldown);
            self.countdown(settings.break_duration).await?;

            self.set_stations_remaining(stations - 1);
        }

        self.state.current_phase = Phase::Complete;
        self.state.seconds_remaining_in_phase = 0;
        self.sink.show_complete();
        self.publish();
        info!("Run complete");
        Ok(())
    }

    /// Count `seconds` ticks down in the current phase.
    ///
    /// A pause outstanding at any tick, or right after the last one, blocks
    /// here until the host confirms a resume. Paused time never consumes a
    /// tick.
    pub async fn countdown(&mut self, seconds: u64) -> Result<(), TimerError> {
        self.state.seconds_remaining_in_phase = seconds;
        self.publish();

        while self.state.seconds_remaining_in_phase > 0 {
            if self.pause.is_paused() {
                self.wait_for_resume().await?;
            } else {
                self.tick();
                self.clock.wait(self.period).await;
            }
        }

        if self.pause.is_paused() {
            self.wait_for_resume().await?;
        }
        Ok(())
    }

    fn tick(&mut self) {
        if self.state.current_phase == Phase::Cooldown {
            self.sink.trigger_cue();
        }
        self.sink.restart_progress();
        self.sink
            .set_elapsed_text(&format_elapsed(self.state.seconds_remaining_in_phase));

        self.state.seconds_remaining_in_phase -= 1;
        self.publish();
    }

    /// Pause handshake: keep issuing `pause-wait` until the host replies false
    async fn wait_for_resume(&mut self) -> Result<(), TimerError> {
        info!(
            "Paused with {}s left in {} phase",
            self.state.seconds_remaining_in_phase, self.state.current_phase
        );

        loop {
            if !self.pause.begin_wait() {
                debug!("Resume confirmed before pause-wait was issued");
                break;
            }
            self.publish();

            debug!("Waiting for host to confirm resume");
            let reply = self.host.request(HostMessage::PauseWait).await?;
            let still_paused = match reply.as_bool() {
                Some(value) => value,
                None => {
                    return Err(HostError::UnexpectedReply {
                        event: HostMessage::PauseWait.event_name(),
                        reply,
                    }
                    .into())
                }
            };

            self.pause.resolve(still_paused);
            if !still_paused {
                break;
            }

            // A host that keeps answering true must not spin this loop
            warn!("Host reports the timer is still paused, asking again");
            self.clock.wait(self.period).await;
        }

        self.publish();
        info!("Resumed");
        Ok(())
    }

    fn enter_phase(&mut self, phase: Phase) {
        debug!("Entering {} phase", phase);
        self.state.current_phase = phase;
        self.sink.set_phase_style(phase);
        self.publish();
    }

    fn set_stations_remaining(&mut self, stations: u64) {
        self.state.stations_remaining = stations;
        self.sink.set_remaining_text(&format_remaining(stations));
        self.publish();
    }

    fn publish(&mut self) {
        self.state.paused = self.pause.is_paused();
        self.sink.publish(&self.state);
    }
}
