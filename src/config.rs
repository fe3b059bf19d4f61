//! Configuration for the biometric event recorder.
//!
//! # Example
//!
//! ```rust
//! use biometrics::config::RecorderConfig;
//!
//! // Use defaults
//! let config = RecorderConfig::default();
//!
//! // Or cap the number of undelivered events
//! let config = RecorderConfig::new().with_queue_capacity(64);
//! assert_eq!(config.queue_capacity, Some(64));
//! ```

use crate::RecorderError;

/// Settings applied when a recorder is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Optional cap on events waiting for delivery.
    ///
    /// `None` keeps every event regardless of how far the sinks fall
    /// behind. With a cap, entry points still never wait: an event that
    /// would exceed it is discarded and counted in
    /// [`RecorderStats::dropped`](crate::RecorderStats::dropped).
    ///
    /// Default: `None`. A cap must be greater than zero.
    pub queue_capacity: Option<usize>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            queue_capacity: None,
        }
    }
}

impl RecorderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of undelivered events; later ones are dropped.
    #[must_use]
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = Some(queue_capacity);
        self
    }

    /// Checks that the configuration can be used to spawn a recorder.
    pub fn validate(&self) -> Result<(), RecorderError> {
        if self.queue_capacity == Some(0) {
            return Err(RecorderError::InvalidQueueCapacity(0));
        }
        Ok(())
    }
}
