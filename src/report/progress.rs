// Progress counter throttling

/// Decides when the `N/M` progress counter is redrawn.
///
/// The redraw step doubles whenever it falls below a fifth of the current
/// test number, so a run of `n` tests redraws `O(log n)` times.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    step: u64,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self { step: 1 }
    }

    /// Current redraw step; never decreases
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn should_display(&mut self, number: u64) -> bool {
        // step < number / 5, without losing the fraction
        while self.step.saturating_mul(5) < number {
            self.step *= 2;
        }
        number % self.step == 0
    }
}
