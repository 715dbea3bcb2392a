//! Interval timer background task

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

use crate::{
    services::{LocalHost, StatusSink},
    state::{AppState, TimerSettings},
    timer::{HostMessage, IntervalCountdownController, TimerError, TokioClock},
};

/// How a run ended
enum RunOutcome {
    Finished(Result<(), TimerError>),
    Superseded(TimerSettings),
    Closed,
}

/// Background task that runs the countdown for every `start-timer` message
pub async fn interval_timer_task(state: Arc<AppState>, inbox: broadcast::Receiver<HostMessage>) {
    let host = Arc::new(LocalHost::new(Arc::clone(&state)));
    let sink = Arc::new(StatusSink::new(Arc::clone(&state)));
    let controller = IntervalCountdownController::new(host, sink, Arc::new(TokioClock))
        .with_period(state.tick_period)
        .with_pause(state.pause.clone());

    run_controller(state, controller, inbox).await;
}

/// Drive `controller` from inbound host messages.
///
/// A `start-timer` arriving while a run is in progress drops that run and
/// starts over with the new settings.
pub async fn run_controller(
    state: Arc<AppState>,
    mut controller: IntervalCountdownController,
    mut inbox: broadcast::Receiver<HostMessage>,
) {
    info!("Starting interval timer task");

    let mut next: Option<TimerSettings> = None;

    loop {
        let settings = match next.take() {
            Some(settings) => settings,
            None => match next_start(&mut inbox).await {
                Some(settings) => settings,
                None => break,
            },
        };

        if let Err(e) = state.remember_settings(settings) {
            error!("Failed to store settings: {}", e);
        }
        // A superseded run may have left the pause window up
        state.set_pause_window(false);

        let outcome = {
            let run = controller.run(settings);
            tokio::pin!(run);

            loop {
                tokio::select! {
                    result = &mut run => break RunOutcome::Finished(result),

                    message = inbox.recv() => match message {
                        Ok(HostMessage::StartTimer(settings)) => {
                            break RunOutcome::Superseded(settings)
                        }
                        Ok(other) => {
                            debug!("Ignoring {} while a run is in progress", other.event_name())
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Missed {} host messages", skipped)
                        }
                        Err(RecvError::Closed) => break RunOutcome::Closed,
                    },
                }
            }
        };

        match outcome {
            RunOutcome::Finished(Ok(())) => debug!("Run finished, waiting for next start-timer"),
            RunOutcome::Finished(Err(e)) => error!("Run aborted: {}", e),
            RunOutcome::Superseded(settings) => {
                info!("start-timer received during a run, starting over");
                next = Some(settings);
            }
            RunOutcome::Closed => break,
        }
    }

    info!("Host channel closed, interval timer task stopped");
}

/// Wait for the next `start-timer`, or `None` once the channel closes
async fn next_start(inbox: &mut broadcast::Receiver<HostMessage>) -> Option<TimerSettings> {
    loop {
        match inbox.recv().await {
            Ok(HostMessage::StartTimer(settings)) => return Some(settings),
            Ok(other) => debug!("Ignoring {} while idle", other.event_name()),
            Err(RecvError::Lagged(skipped)) => warn!("Missed {} host messages", skipped),
            Err(RecvError::Closed) => return None,
        }
    }
}
