//! Built-in sinks.
//!
//! These sinks cover the common destinations out of the box. Register them
//! through [`BiometricRecorder::spawn`](crate::BiometricRecorder::spawn).

mod channel;
mod logging;
#[cfg(any(test, feature = "mocks"))]
mod memory;
mod summary;
#[cfg(feature = "tracing")]
mod tracing;

pub use channel::ChannelSink;
pub use logging::LoggingSink;
#[cfg(any(test, feature = "mocks"))]
pub use memory::MemorySink;
pub use summary::{BiometricSummary, SummarySink, summarize};
#[cfg(feature = "tracing")]
pub use self::tracing::TracingSink;
