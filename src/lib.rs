//! Biometric authentication event recorder.
//!
//! Application code reports four lifecycle signals (enrollment,
//! unenrollment, successful and failed authentication) and the recorder
//! forwards each one as a [`events::BiometricEvent`] to the sinks
//! registered at startup. Reporting never blocks and never fails: sink
//! errors are logged and counted, and with no sinks configured every call
//! is a no-op.
//!
//! # Example
//!
//! ```rust,ignore
//! use biometrics::{BiometricRecorder, RecorderConfig};
//! use biometrics::events::sinks::{LoggingSink, SummarySink};
//!
//! let summary = SummarySink::new();
//! let recorder = BiometricRecorder::spawn(RecorderConfig::default(), |registry| {
//!     registry.sink(LoggingSink::new()).sink(summary.clone());
//! })?;
//!
//! recorder.enrolled();
//! recorder.authentication_succeeded();
//! ```

use std::fmt;

pub mod config;
pub mod events;
pub mod global;
mod recorder;

pub use config::RecorderConfig;
pub use global::{
    authentication_failed, authentication_succeeded, enrolled, install_recorder, recorder,
    register_biometric_sinks, unenrolled,
};
pub use recorder::{BiometricRecorder, RecorderStats};

/// Failure reported by a [`events::Sink`].
///
/// Sink failures are absorbed by the recorder and never reach the caller
/// of an entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The destination is no longer accepting events.
    Closed,
    /// The destination refused the event.
    Rejected(String),
    /// The sink panicked while handling the event.
    Panicked,
}

impl std::error::Error for SinkError {}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Closed => write!(f, "Sink is closed"),
            SinkError::Rejected(msg) => write!(f, "Sink rejected event: {msg}"),
            SinkError::Panicked => write!(f, "Sink panicked"),
        }
    }
}

/// Failure to construct a recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderError {
    /// No tokio runtime is available to run the dispatch worker.
    NoRuntime,
    /// The event queue must hold at least one event.
    InvalidQueueCapacity(usize),
}

impl std::error::Error for RecorderError {}

impl fmt::Display for RecorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecorderError::NoRuntime => {
                write!(f, "Recorder must be spawned from within a tokio runtime")
            }
            RecorderError::InvalidQueueCapacity(capacity) => {
                write!(f, "Invalid queue capacity: {capacity}")
            }
        }
    }
}
