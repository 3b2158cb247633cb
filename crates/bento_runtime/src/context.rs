//! Per-tick context.

/// Context passed to every system hook by the demo driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickContext {
    /// Simulated time step.
    pub delta: f64,
    /// Current tick number. Zero during `start`; the first update is tick 1.
    pub tick: u64,
}

impl Default for TickContext {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TickContext {
    /// Creates a context at tick zero.
    #[must_use]
    pub fn new(delta: f64) -> Self {
        Self { delta, tick: 0 }
    }

    /// Moves to the next tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
