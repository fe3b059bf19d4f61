//! Process-wide recorder.
//!
//! For call sites that cannot be handed a [`BiometricRecorder`], install one
//! at startup and report through the free functions in this module. The
//! recorder can be installed only once; until then every call is a no-op.
//!
//! ```rust,ignore
//! use biometrics::{RecorderConfig, register_biometric_sinks};
//! use biometrics::events::sinks::LoggingSink;
//!
//! #[tokio::main]
//! async fn main() {
//!     register_biometric_sinks(RecorderConfig::default(), |registry| {
//!         registry.sink(LoggingSink::new());
//!     })
//!     .expect("biometric recorder");
//!
//!     // anywhere in the app
//!     biometrics::authentication_succeeded();
//! }
//! ```

use std::sync::OnceLock;

use crate::events::SinkRegistry;
use crate::{BiometricRecorder, RecorderConfig, RecorderError};

static RECORDER: OnceLock<BiometricRecorder> = OnceLock::new();

/// Install `recorder` as the process-wide recorder.
///
/// Only the first call takes effect. Later calls log a warning and drop the
/// recorder they were given.
pub fn install_recorder(recorder: BiometricRecorder) {
    if RECORDER.set(recorder).is_err() {
        log::warn!(
            target: "biometrics",
            "install_recorder called more than once, ignoring"
        );
    }
}

/// Spawn a recorder with the given sinks and install it process-wide.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns the [`RecorderError`] from [`BiometricRecorder::spawn`].
pub fn register_biometric_sinks<F>(config: RecorderConfig, f: F) -> Result<(), RecorderError>
where
    F: FnOnce(&mut SinkRegistry),
{
    let recorder = BiometricRecorder::spawn(config, f)?;
    install_recorder(recorder);
    Ok(())
}

/// Returns the installed recorder, if any.
pub fn recorder() -> Option<&'static BiometricRecorder> {
    RECORDER.get()
}

/// See [`BiometricRecorder::enrolled`].
pub fn enrolled() {
    if let Some(recorder) = RECORDER.get() {
        recorder.enrolled();
    }
}

/// See [`BiometricRecorder::unenrolled`].
pub fn unenrolled() {
    if let Some(recorder) = RECORDER.get() {
        recorder.unenrolled();
    }
}

/// See [`BiometricRecorder::authentication_succeeded`].
pub fn authentication_succeeded() {
    if let Some(recorder) = RECORDER.get() {
        recorder.authentication_succeeded();
    }
}

/// See [`BiometricRecorder::authentication_failed`].
pub fn authentication_failed() {
    if let Some(recorder) = RECORDER.get() {
        recorder.authentication_failed();
    }
}
