use async_trait::async_trait;

use super::BiometricEvent;
use crate::SinkError;

/// Trait for receiving biometric events asynchronously.
///
/// Implement this trait to forward events to an analytics pipeline, an
/// audit log, or a security-policy engine. Errors returned here are logged
/// and counted by the recorder; they never reach the code that reported
/// the event.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use biometrics::events::{BiometricEvent, BiometricEventKind, Sink};
/// use biometrics::SinkError;
///
/// struct LockoutPolicy;
///
/// #[async_trait]
/// impl Sink for LockoutPolicy {
///     async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError> {
///         if event.kind() == BiometricEventKind::AuthFailed {
///             // bump the failure counter
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    /// Receive one event.
    ///
    /// Called once per event, in the order events were reported.
    async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError>;
}
