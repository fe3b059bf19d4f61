use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four biometric lifecycle signals an application can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricEventKind {
    /// The user completed biometric enrollment.
    Enrolled,
    /// The user removed or disabled biometric enrollment.
    Unenrolled,
    /// A biometric authentication attempt succeeded.
    AuthSucceeded,
    /// A biometric authentication attempt failed.
    AuthFailed,
}

impl BiometricEventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Enrolled,
        Self::Unenrolled,
        Self::AuthSucceeded,
        Self::AuthFailed,
    ];

    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Enrolled => "biometric.enrolled",
            Self::Unenrolled => "biometric.unenrolled",
            Self::AuthSucceeded => "biometric.auth.succeeded",
            Self::AuthFailed => "biometric.auth.failed",
        }
    }
}

/// A biometric lifecycle event.
///
/// Events are created by the recorder at the moment an entry point is
/// invoked and handed to every configured sink. They are never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiometricEvent {
    kind: BiometricEventKind,
    at: DateTime<Utc>,
}

impl BiometricEvent {
    /// Creates an event of `kind` stamped with the current time.
    #[must_use]
    pub fn new(kind: BiometricEventKind) -> Self {
        Self::at(kind, Utc::now())
    }

    /// Creates an event with an explicit timestamp.
    #[must_use]
    pub fn at(kind: BiometricEventKind, at: DateTime<Utc>) -> Self {
        Self { kind, at }
    }

    pub fn kind(&self) -> BiometricEventKind {
        self.kind
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
