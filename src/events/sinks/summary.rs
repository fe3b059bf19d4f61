use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::SinkError;
use crate::events::{BiometricEvent, BiometricEventKind, Sink};

/// Running totals over a stream of biometric events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BiometricSummary {
    pub enrolled: u64,
    pub unenrolled: u64,
    pub auth_succeeded: u64,
    pub auth_failed: u64,
    /// Failed attempts since the last successful one.
    pub failure_streak: u64,
    pub last_event_at: Option<DateTime<Utc>>,
}

impl BiometricSummary {
    /// Folds one event into the totals.
    pub fn apply(&mut self, event: &BiometricEvent) {
        match event.kind() {
            BiometricEventKind::Enrolled => self.enrolled += 1,
            BiometricEventKind::Unenrolled => self.unenrolled += 1,
            BiometricEventKind::AuthSucceeded => {
                self.auth_succeeded += 1;
                self.failure_streak = 0;
            }
            BiometricEventKind::AuthFailed => {
                self.auth_failed += 1;
                self.failure_streak += 1;
            }
        }
        self.last_event_at = Some(event.timestamp());
    }

    pub fn total(&self) -> u64 {
        self.enrolled + self.unenrolled + self.auth_succeeded + self.auth_failed
    }

    /// Share of authentication attempts that failed, or `None` before the
    /// first attempt.
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    pub fn failure_rate(&self) -> Option<f64> {
        let attempts = self.auth_succeeded + self.auth_failed;
        if attempts == 0 {
            return None;
        }
        Some(self.auth_failed as f64 / attempts as f64)
    }
}

/// Computes a summary over a recorded batch of events.
pub fn summarize(events: &[BiometricEvent]) -> BiometricSummary {
    let mut summary = BiometricSummary::default();
    for event in events {
        summary.apply(event);
    }
    summary
}

/// Aggregates events into a [`BiometricSummary`] as they arrive.
///
/// Clones share the same totals.
#[derive(Clone, Default)]
pub struct SummarySink {
    summary: Arc<Mutex<BiometricSummary>>,
}

impl SummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> BiometricSummary {
        self.summary
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Sink for SummarySink {
    async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError> {
        self.summary
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(event);
        Ok(())
    }
}
