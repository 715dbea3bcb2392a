//! Tick timing for the countdown loop

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

/// Default tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Source of the once-per-tick wait
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspend for one tick period
    async fn wait(&self, period: Duration);
}

/// Clock backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn wait(&self, period: Duration) {
        sleep(period).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_tokio_clock_waits_at_least_the_period() {
        let started = Instant::now();
        TokioClock.wait(Duration::from_millis(20)).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
