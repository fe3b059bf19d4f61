//! Biometric events and the sinks that receive them.
//!
//! Every entry point of the recorder produces one [`BiometricEvent`]. The
//! recorder forwards it to the [`Sink`]s registered at startup; if none are
//! registered, events are silently dropped.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use biometrics::{BiometricRecorder, RecorderConfig};
//! use biometrics::events::sinks::LoggingSink;
//!
//! let recorder = BiometricRecorder::spawn(RecorderConfig::default(), |registry| {
//!     registry.sink(LoggingSink::new());
//! })?;
//!
//! recorder.enrolled();
//! recorder.authentication_failed();
//! ```
//!
//! # Custom Sinks
//!
//! Implement the [`Sink`] trait to forward events anywhere:
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use biometrics::events::{BiometricEvent, BiometricEventKind, Sink};
//! use biometrics::SinkError;
//!
//! struct MetricsSink;
//!
//! #[async_trait]
//! impl Sink for MetricsSink {
//!     async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError> {
//!         match event.kind() {
//!             BiometricEventKind::AuthSucceeded => {
//!                 // increment success counter
//!             }
//!             BiometricEventKind::AuthFailed => {
//!                 // increment failure counter
//!             }
//!             _ => {}
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod event;
mod registry;
mod sink;

pub mod sinks;

pub use event::{BiometricEvent, BiometricEventKind};
pub use registry::SinkRegistry;
pub use sink::Sink;
