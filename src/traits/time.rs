/// Abstraction over time sources.
/// Implementations: SystemTimeProvider (production), MockTimeProvider (testing).
pub trait TimeProvider {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
}

/// System time provider using std::time::Instant.
pub struct SystemTimeProvider {
    start: std::time::Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Mock time provider for deterministic testing.
pub struct MockTimeProvider {
    current_us: std::cell::Cell<i64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self {
            current_us: std::cell::Cell::new(0),
        }
    }

    pub fn set_time(&self, us: i64) {
        self.current_us.set(us);
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us.set(self.current_us.get() + delta_us);
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.current_us.get()
    }
}

/// Turns successive time readings into per-frame deltas for the beat clock.
pub struct FrameTimer<T: TimeProvider> {
    provider: T,
    last_us: i64,
}

impl<T: TimeProvider> FrameTimer<T> {
    pub fn new(provider: T) -> Self {
        let last_us = provider.now_us();
        Self { provider, last_us }
    }

    /// Seconds since the previous tick (or since construction).
    /// A source that steps backwards yields zero.
    pub fn tick(&mut self) -> f64 {
        let now = self.provider.now_us();
        let delta_us = (now - self.last_us).max(0);
        self.last_us = now;
        delta_us as f64 / 1_000_000.0
    }

    pub fn provider(&self) -> &T {
        &self.provider
    }
}
