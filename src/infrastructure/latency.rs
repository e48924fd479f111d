use rand::Rng;
use std::time::Duration;

/// Simulated I/O delay applied by the in-memory stores on writes.
///
/// Each pause sleeps for a uniformly random duration in `[0, max]`. A zero
/// `max` disables the delay entirely so tests stay deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    max: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_millis(max_ms: u64) -> Self {
        Self {
            max: Duration::from_millis(max_ms),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.max.is_zero()
    }

    pub async fn pause(&self) {
        if !self.is_enabled() {
            return;
        }
        // ThreadRng is !Send, so draw before awaiting.
        let delay = {
            let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
            Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
        };
        tokio::time::sleep(delay).await;
    }
}
