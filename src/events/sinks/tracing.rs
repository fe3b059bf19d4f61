use async_trait::async_trait;

use crate::SinkError;
use crate::events::{BiometricEvent, Sink};

/// Emits biometric events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
pub struct TracingSink;

#[async_trait]
impl Sink for TracingSink {
    async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError> {
        tracing::info!(
            target: "biometrics::events",
            event_name = event.name(),
            at = %event.timestamp(),
            "biometric event"
        );
        Ok(())
    }
}
