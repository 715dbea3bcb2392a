//! Run state structure for the interval countdown

use serde::{Deserialize, Serialize};

/// Which part of a run the controller is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No run has started yet
    #[default]
    Idle,
    /// Working at a station
    Active,
    /// Moving to the next station
    Cooldown,
    /// All stations done
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Cooldown => "cooldown",
            Phase::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a run, owned and mutated by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub paused: bool,
    pub current_phase: Phase,
    pub stations_remaining: u64,
    pub seconds_remaining_in_phase: u64,
}

impl RunState {
    /// Idle state before any run
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state for a run over `num_repeats` stations
    pub fn starting(num_repeats: u64) -> Self {
        Self {
            paused: false,
            current_phase: Phase::Idle,
            stations_remaining: num_repeats,
            seconds_remaining_in_phase: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_phase == Phase::Complete
    }

    /// A run is in progress between start and completion
    pub fn is_running(&self) -> bool {
        matches!(self.current_phase, Phase::Active | Phase::Cooldown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_state() {
        let state = RunState::starting(4);
        assert_eq!(state.stations_remaining, 4);
        assert_eq!(state.current_phase, Phase::Idle);
        assert!(!state.paused);
        assert!(!state.is_running());
    }

    #[test]
    fn test_serialized_field_names() {
        let state = RunState {
            paused: true,
            current_phase: Phase::Cooldown,
            stations_remaining: 2,
            seconds_remaining_in_phase: 7,
        };
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["paused"], true);
        assert_eq!(json["currentPhase"], "cooldown");
        assert_eq!(json["stationsRemaining"], 2);
        assert_eq!(json["secondsRemainingInPhase"], 7);
    }
}
