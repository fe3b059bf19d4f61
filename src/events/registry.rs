use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use super::{BiometricEvent, Sink};
use crate::SinkError;

/// Ordered set of sinks attached to a recorder.
///
/// Built once through the closure passed to
/// [`BiometricRecorder::spawn`](crate::BiometricRecorder::spawn) and never
/// modified afterwards.
pub struct SinkRegistry {
    sinks: Vec<Box<dyn Sink>>,
}

impl SinkRegistry {
    pub(crate) fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Register a sink to receive events.
    ///
    /// Sinks are called in the order they are registered.
    pub fn sink(&mut self, sink: impl Sink) -> &mut Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Offers `event` to every sink and returns how many of them failed.
    ///
    /// A failing or panicking sink does not stop delivery to the ones
    /// registered after it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "deliver", skip_all, fields(event = event.name()))
    )]
    pub(crate) async fn deliver(&self, event: &BiometricEvent) -> u64 {
        let mut failures = 0;

        for (index, sink) in self.sinks.iter().enumerate() {
            let outcome = AssertUnwindSafe(sink.record(event))
                .catch_unwind()
                .await
                .unwrap_or(Err(SinkError::Panicked));

            if let Err(err) = outcome {
                failures += 1;
                log::warn!(
                    target: "biometrics",
                    "msg=\"sink delivery failed\", event={}, sink_index={index}, error=\"{err}\"",
                    event.name()
                );
            }
        }

        failures
    }
}
