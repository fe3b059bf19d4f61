use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::events::{BiometricEvent, BiometricEventKind, SinkRegistry};
use crate::{RecorderConfig, RecorderError};

enum Command {
    Record(BiometricEvent),
    Flush(oneshot::Sender<()>),
}

#[derive(Default)]
struct Counters {
    emitted: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
    sink_failures: AtomicU64,
    unconfigured: AtomicU64,
    pending: AtomicU64,
}

/// Point-in-time view of a recorder's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderStats {
    /// Events accepted into the delivery queue.
    pub emitted: u64,
    /// Events offered to every sink, whether or not each sink succeeded.
    pub delivered: u64,
    /// Events discarded because the optional queue cap was reached or the
    /// worker had stopped.
    pub dropped: u64,
    /// Individual sink calls that returned an error or panicked.
    pub sink_failures: u64,
    /// Entry point calls made while no sink was configured.
    pub unconfigured: u64,
}

/// Records biometric lifecycle events and forwards them to sinks.
///
/// The four entry points are synchronous and never block: each one stamps
/// a [`BiometricEvent`] and queues it for a background worker that awaits
/// every registered sink in turn. Events reach the sinks in the order the
/// calls were made.
///
/// Pass the recorder by reference (or behind an `Arc`) to the code that
/// reports events, or install it process-wide with
/// [`install_recorder`](crate::install_recorder).
pub struct BiometricRecorder {
    tx: Option<mpsc::UnboundedSender<Command>>,
    queue_capacity: Option<u64>,
    worker: Option<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl BiometricRecorder {
    /// Creates a recorder with no sinks. Every entry point is a no-op.
    pub fn disabled() -> Self {
        Self {
            tx: None,
            queue_capacity: None,
            worker: None,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Builds the sink registry and starts the dispatch worker on the
    /// current tokio runtime.
    ///
    /// Returns a disabled recorder if the closure registers no sinks.
    ///
    /// # Errors
    ///
    /// - [`RecorderError::InvalidQueueCapacity`] - `config.queue_capacity` is `Some(0)`
    /// - [`RecorderError::NoRuntime`] - called outside a tokio runtime
    pub fn spawn<F>(config: RecorderConfig, f: F) -> Result<Self, RecorderError>
    where
        F: FnOnce(&mut SinkRegistry),
    {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| RecorderError::NoRuntime)?;

        let mut registry = SinkRegistry::new();
        f(&mut registry);

        if registry.is_empty() {
            log::debug!(
                target: "biometrics",
                "msg=\"no sinks registered, biometric events will be dropped\""
            );
            return Ok(Self::disabled());
        }

        let sink_count = registry.len();
        let counters = Arc::new(Counters::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = runtime.spawn(run(rx, registry, Arc::clone(&counters)));

        log::debug!(
            target: "biometrics",
            "msg=\"recorder started\", sinks={sink_count}, queue_capacity={:?}",
            config.queue_capacity
        );

        Ok(Self {
            tx: Some(tx),
            queue_capacity: config.queue_capacity.and_then(|cap| u64::try_from(cap).ok()),
            worker: Some(worker),
            counters,
        })
    }

    /// Reports that the user completed biometric enrollment.
    pub fn enrolled(&self) {
        self.emit(BiometricEventKind::Enrolled);
    }

    /// Reports that the user removed or disabled biometric enrollment.
    pub fn unenrolled(&self) {
        self.emit(BiometricEventKind::Unenrolled);
    }

    /// Reports a successful biometric authentication attempt.
    pub fn authentication_succeeded(&self) {
        self.emit(BiometricEventKind::AuthSucceeded);
    }

    /// Reports a failed biometric authentication attempt.
    pub fn authentication_failed(&self) {
        self.emit(BiometricEventKind::AuthFailed);
    }

    /// Returns true if at least one sink receives this recorder's events.
    pub fn is_configured(&self) -> bool {
        self.tx.is_some()
    }

    pub fn stats(&self) -> RecorderStats {
        let counters = &self.counters;
        RecorderStats {
            emitted: counters.emitted.load(Ordering::Relaxed),
            delivered: counters.delivered.load(Ordering::Relaxed),
            dropped: counters.dropped.load(Ordering::Relaxed),
            sink_failures: counters.sink_failures.load(Ordering::Relaxed),
            unconfigured: counters.unconfigured.load(Ordering::Relaxed),
        }
    }

    /// Waits until every event emitted before this call has been offered
    /// to all sinks.
    pub async fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };

        let (ack, done) = oneshot::channel();
        if tx.send(Command::Flush(ack)).is_err() {
            return;
        }
        // worker gone means nothing is left to wait for
        let _ = done.await;
    }

    /// Stops accepting events, delivers what is still queued, and waits for
    /// the worker to finish.
    pub async fn shutdown(mut self) {
        drop(self.tx.take());

        let Some(worker) = self.worker.take() else {
            return;
        };
        if let Err(err) = worker.await {
            log::warn!(
                target: "biometrics",
                "msg=\"recorder worker ended abnormally\", error=\"{err}\""
            );
        }
    }

    fn emit(&self, kind: BiometricEventKind) {
        let Some(tx) = &self.tx else {
            self.counters.unconfigured.fetch_add(1, Ordering::Relaxed);
            log::trace!(
                target: "biometrics",
                "msg=\"no sink configured, event dropped\", event={}",
                kind.name()
            );
            return;
        };

        let pending = self.counters.pending.fetch_add(1, Ordering::AcqRel);
        if self.queue_capacity.is_some_and(|cap| pending >= cap) {
            self.counters.pending.fetch_sub(1, Ordering::AcqRel);
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            log::warn!(
                target: "biometrics",
                "msg=\"event queue full, event dropped\", event={}",
                kind.name()
            );
            return;
        }

        if tx.send(Command::Record(BiometricEvent::new(kind))).is_err() {
            self.counters.pending.fetch_sub(1, Ordering::AcqRel);
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            log::warn!(
                target: "biometrics",
                "msg=\"recorder worker stopped, event dropped\", event={}",
                kind.name()
            );
            return;
        }
        self.counters.emitted.fetch_add(1, Ordering::Relaxed);
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<Command>,
    registry: SinkRegistry,
    counters: Arc<Counters>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Record(event) => {
                let failures = registry.deliver(&event).await;
                counters.sink_failures.fetch_add(failures, Ordering::Relaxed);
                counters.delivered.fetch_add(1, Ordering::Relaxed);
                counters.pending.fetch_sub(1, Ordering::AcqRel);
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    log::debug!(target: "biometrics", "msg=\"recorder stopped\"");
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::SinkError;
    use crate::events::sinks::MemorySink;
    use crate::events::{BiometricEventKind::*, Sink};

    fn recorder_with(sink: &MemorySink) -> BiometricRecorder {
        BiometricRecorder::spawn(RecorderConfig::default(), |registry| {
            registry.sink(sink.clone());
        })
        .unwrap()
    }

    struct Unreachable;

    #[async_trait]
    impl Sink for Unreachable {
        async fn record(&self, _event: &BiometricEvent) -> Result<(), SinkError> {
            Err(SinkError::Rejected("analytics endpoint unreachable".to_owned()))
        }
    }

    #[tokio::test]
    async fn test_disabled_recorder_is_noop() {
        let recorder = BiometricRecorder::disabled();

        recorder.enrolled();
        recorder.unenrolled();
        recorder.authentication_succeeded();
        recorder.authentication_failed();
        recorder.flush().await;

        assert!(!recorder.is_configured());
        let stats = recorder.stats();
        assert_eq!(stats.unconfigured, 4);
        assert_eq!(stats.emitted, 0);
    }

    #[test]
    fn test_disabled_recorder_needs_no_runtime() {
        let recorder = BiometricRecorder::disabled();

        // should not panic
        recorder.authentication_failed();
    }

    #[tokio::test]
    async fn test_each_entry_point_emits_matching_kind() {
        let calls: [(fn(&BiometricRecorder), BiometricEventKind); 4] = [
            (BiometricRecorder::enrolled, Enrolled),
            (BiometricRecorder::unenrolled, Unenrolled),
            (BiometricRecorder::authentication_succeeded, AuthSucceeded),
            (BiometricRecorder::authentication_failed, AuthFailed),
        ];

        for (call, expected) in calls {
            let sink = MemorySink::new();
            let recorder = recorder_with(&sink);

            call(&recorder);
            recorder.flush().await;

            assert_eq!(sink.kinds(), vec![expected]);
        }
    }

    #[tokio::test]
    async fn test_sequence_is_preserved() {
        let sink = MemorySink::new();
        let recorder = recorder_with(&sink);

        recorder.enrolled();
        recorder.authentication_failed();
        recorder.authentication_failed();
        recorder.unenrolled();
        recorder.flush().await;

        assert_eq!(
            sink.kinds(),
            vec![Enrolled, AuthFailed, AuthFailed, Unenrolled]
        );
    }

    #[tokio::test]
    async fn test_repeated_calls_are_not_deduplicated() {
        let sink = MemorySink::new();
        let recorder = recorder_with(&sink);

        recorder.authentication_failed();
        recorder.authentication_failed();
        recorder.authentication_failed();
        recorder.flush().await;

        assert_eq!(sink.kinds(), vec![AuthFailed, AuthFailed, AuthFailed]);
        assert_eq!(recorder.stats().delivered, 3);
    }

    #[tokio::test]
    async fn test_spawn_without_sinks_is_disabled() {
        let recorder = BiometricRecorder::spawn(RecorderConfig::default(), |_| {}).unwrap();

        recorder.enrolled();

        assert!(!recorder.is_configured());
        assert_eq!(recorder.stats().unconfigured, 1);
    }

    #[test]
    fn test_spawn_outside_runtime() {
        let result = BiometricRecorder::spawn(RecorderConfig::default(), |registry| {
            registry.sink(MemorySink::new());
        });

        assert!(matches!(result, Err(RecorderError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_spawn_rejects_zero_capacity() {
        let result = BiometricRecorder::spawn(
            RecorderConfig::new().with_queue_capacity(0),
            |registry| {
                registry.sink(MemorySink::new());
            },
        );

        assert!(matches!(
            result,
            Err(RecorderError::InvalidQueueCapacity(0))
        ));
    }

    #[tokio::test]
    async fn test_capped_queue_drops_without_blocking() {
        let sink = MemorySink::new();
        let recorder =
            BiometricRecorder::spawn(RecorderConfig::new().with_queue_capacity(1), |registry| {
                registry.sink(sink.clone());
            })
            .unwrap();

        // the worker cannot run until this task yields
        for _ in 0..5 {
            recorder.enrolled();
        }

        let stats = recorder.stats();
        assert_eq!(stats.emitted, 1);
        assert_eq!(stats.dropped, 4);

        recorder.flush().await;
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_large_burst_is_fully_delivered() {
        let sink = MemorySink::new();
        let recorder = recorder_with(&sink);

        // no yield in between, so the worker sees the whole burst queued
        for _ in 0..2000 {
            recorder.authentication_failed();
        }
        recorder.flush().await;

        assert_eq!(sink.len(), 2000);
        let stats = recorder.stats();
        assert_eq!(stats.emitted, 2000);
        assert_eq!(stats.delivered, 2000);
        assert_eq!(stats.dropped, 0);
    }

    #[tokio::test]
    async fn test_capped_queue_accepts_again_after_draining() {
        let sink = MemorySink::new();
        let recorder =
            BiometricRecorder::spawn(RecorderConfig::new().with_queue_capacity(2), |registry| {
                registry.sink(sink.clone());
            })
            .unwrap();

        recorder.enrolled();
        recorder.enrolled();
        recorder.enrolled();
        recorder.flush().await;
        recorder.unenrolled();
        recorder.flush().await;

        assert_eq!(sink.kinds(), vec![Enrolled, Enrolled, Unenrolled]);
        assert_eq!(recorder.stats().dropped, 1);
    }

    #[tokio::test]
    async fn test_sink_failure_is_absorbed() {
        let sink = MemorySink::new();
        let recorder = BiometricRecorder::spawn(RecorderConfig::default(), |registry| {
            registry.sink(Unreachable).sink(sink.clone());
        })
        .unwrap();

        recorder.authentication_failed();
        recorder.authentication_succeeded();
        recorder.flush().await;

        assert_eq!(sink.kinds(), vec![AuthFailed, AuthSucceeded]);
        let stats = recorder.stats();
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.sink_failures, 2);
        assert_eq!(stats.dropped, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers() {
        let sink = MemorySink::new();
        let recorder = Arc::new(recorder_with(&sink));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let recorder = Arc::clone(&recorder);
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    recorder.enrolled();
                    recorder.unenrolled();
                    recorder.authentication_succeeded();
                    recorder.authentication_failed();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        recorder.flush().await;

        let mut per_kind: HashMap<BiometricEventKind, usize> = HashMap::new();
        for kind in sink.kinds() {
            *per_kind.entry(kind).or_default() += 1;
        }

        assert_eq!(sink.len(), 800);
        for kind in BiometricEventKind::ALL {
            assert_eq!(per_kind.get(&kind), Some(&200));
        }
        assert_eq!(recorder.stats().dropped, 0);
    }

    #[tokio::test]
    async fn test_shutdown_drains_queue() {
        let sink = MemorySink::new();
        let recorder = recorder_with(&sink);

        recorder.enrolled();
        recorder.authentication_succeeded();
        recorder.unenrolled();
        recorder.shutdown().await;

        assert_eq!(sink.kinds(), vec![Enrolled, AuthSucceeded, Unenrolled]);
    }
}
