use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::SinkError;
use crate::events::{BiometricEvent, Sink};

/// Forwards owned events to an async consumer over an unbounded channel.
///
/// Use this to hand events to an analytics pipeline that runs as its own
/// task.
///
/// # Example
///
/// ```rust,ignore
/// use biometrics::events::sinks::ChannelSink;
///
/// let (sink, mut events) = ChannelSink::new();
///
/// tokio::spawn(async move {
///     while let Some(event) = events.recv().await {
///         analytics.track(event.name(), event.timestamp()).await;
///     }
/// });
/// ```
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<BiometricEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BiometricEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Wraps an existing sender, e.g. one shared with other producers.
    pub fn from_sender(tx: mpsc::UnboundedSender<BiometricEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Sink for ChannelSink {
    async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError> {
        self.tx.send(event.clone()).map_err(|_| SinkError::Closed)
    }
}
