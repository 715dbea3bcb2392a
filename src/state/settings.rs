//! Timer settings carried by the `start-timer` message

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Settings for one run: how long each station lasts, how long the break
/// between stations lasts, and how many stations there are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSettings")]
pub struct TimerSettings {
    /// Active phase length in seconds
    pub duration: u64,
    /// Cooldown phase length in seconds
    pub break_duration: u64,
    /// Number of stations
    pub num_repeats: u64,
}

impl TimerSettings {
    pub fn new(duration: u64, break_duration: u64, num_repeats: u64) -> Self {
        Self {
            duration,
            break_duration,
            num_repeats,
        }
    }

    /// Total number of ticks a full unpaused run takes
    pub fn total_ticks(&self) -> u64 {
        self.num_repeats
            .saturating_mul(self.duration.saturating_add(self.break_duration))
    }
}

/// Settings as they arrive over the wire. Hosts send plain JSON numbers,
/// so nothing stops them from being negative or fractional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    duration: f64,
    break_duration: f64,
    num_repeats: f64,
}

impl From<RawSettings> for TimerSettings {
    fn from(raw: RawSettings) -> Self {
        Self {
            duration: whole_units("duration", raw.duration),
            break_duration: whole_units("breakDuration", raw.break_duration),
            num_repeats: whole_units("numRepeats", raw.num_repeats),
        }
    }
}

/// Truncate to whole units, clamping anything below zero (or not a number) to 0
fn whole_units(field: &str, value: f64) -> u64 {
    if value.is_finite() && value >= 0.0 {
        // `as` saturates at u64::MAX for huge values
        value.trunc() as u64
    } else {
        warn!("Invalid {} value {}, clamping to 0", field, value);
        0
    }
}
