//! Progress tracking utilities
//!
//! Provides a progress tracker for logging progress at regular intervals
//! while the pipeline walks a sequence pool. Progress output is a
//! side-channel: it is observable but never part of output correctness.

use log::info;

/// Progress tracker that logs through `log::info!` at interval boundaries.
///
/// # Example
/// ```
/// use oligosim_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Processed sequences").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // logs at 100, 200
/// }
/// tracker.log_final(); // logs "Processed sequences 250 (complete)"
/// ```
pub struct ProgressTracker {
    /// The logging interval - progress is logged when the count crosses multiples of this.
    interval: u64,
    /// Message prefix for log output.
    message: String,
    /// Count of items processed so far.
    count: u64,
}

impl ProgressTracker {
    /// Create a new progress tracker with the specified message prefix.
    ///
    /// The tracker starts at 0 with a default interval of 10,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 10_000, message: message.into(), count: 0 }
    }

    /// Set the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Add to the count and log each interval boundary that was crossed.
    pub fn log_if_needed(&mut self, additional: u64) {
        let prev = self.count;
        self.count += additional;
        for i in (prev / self.interval + 1)..=(self.count / self.interval) {
            info!("{} {}", self.message, i * self.interval);
        }
    }

    /// Log the final count if it did not land exactly on an interval boundary.
    pub fn log_final(&self) {
        if self.count % self.interval != 0 {
            info!("{} {} (complete)", self.message, self.count);
        }
    }

    /// The number of items counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
