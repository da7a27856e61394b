use std::time::Duration;

/// Millisecond clock driven by the host. Nothing in the core ever
/// sleeps against it; suspensions and timers compare deadlines to
/// `now_ms` on each tick.
#[derive(Debug, Clone, Default)]
pub struct ScriptClock {
    now_ms: u64,
}

impl ScriptClock {
    pub fn new() -> Self {
        Self { now_ms: 0 }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn advance_ms(&mut self, ms: u64) -> u64 {
        self.now_ms = self.now_ms.saturating_add(ms);
        self.now_ms
    }

    pub fn advance(&mut self, duration: Duration) -> u64 {
        self.advance_ms(duration.as_millis() as u64)
    }
}
