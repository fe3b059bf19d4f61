#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::SinkError;
use crate::events::{BiometricEvent, BiometricEventKind, Sink};

/// Captures events in memory. Clones share the same buffer, so keep one
/// handle for assertions and register the other.
#[derive(Clone, Default)]
pub struct MemorySink {
    pub events: Arc<Mutex<Vec<BiometricEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BiometricEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<BiometricEventKind> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(BiometricEvent::kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn record(&self, event: &BiometricEvent) -> Result<(), SinkError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
