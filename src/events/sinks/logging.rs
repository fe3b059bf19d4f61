use async_trait::async_trait;

use crate::SinkError;
use crate::events::{BiometricEvent, BiometricEventKind, Sink};

/// Logs biometric events using the `log` crate.
///
/// Failed authentication attempts are logged at their own level (WARN by
/// default) so they stand out from routine enrollment and success events.
///
/// # Example
///
/// ```rust,ignore
/// use biometrics::{BiometricRecorder, RecorderConfig};
/// use biometrics::events::sinks::LoggingSink;
///
/// BiometricRecorder::spawn(RecorderConfig::default(), |registry| {
///     registry.sink(LoggingSink::new().with_failure_level(log::Level::Error));
/// })?;
/// ```
pub struct LoggingSink {
    level: log::Level,
    failure_level: log::Level,
}

impl LoggingSink {
    /// Logs routine events at INFO and failed attempts at WARN.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
            failure_level: log::Level::Warn,
        }
    }

    /// Sets the level for enrollment changes and successful attempts.
    #[must_use]
    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the level for failed authentication attempts.
    #[must_use]
    pub fn with_failure_level(mut self, failure_level: log::Level) -> Self {
        self.failure_level = failure_level;
        self
    }

    fn level_for(&self, kind: BiometricEventKind) -> log::Level {
        match kind {
            BiometricEventKind::AuthFailed => self.failure_level,
            BiometricEventKind::Enrolled
            | BiometricEventKind::Unenrolled
            | BiometricEventKind::AuthSucceeded => self.level,
        }
    }
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sink for LoggingSink {
    async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError> {
        log::log!(
            target: "biometrics::events",
            self.level_for(event.kind()),
            "event={} at={}",
            event.name(),
            event.timestamp().to_rfc3339()
        );
        Ok(())
    }
}
