//! Conversion status events
//!
//! Milestones are broadcast to every subscribed receiver. Sending never
//! blocks; with no subscriber the event is only logged.

use tokio::sync::broadcast::{self, error::TryRecvError, Receiver, Sender};

/// Events buffered per receiver before the oldest are overwritten
const CAPACITY: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// A human-readable milestone or error message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEvent {
    pub level: StatusLevel,
    pub message: String,
}

impl StatusEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct StatusChannel {
    tx: Sender<StatusEvent>,
}

impl Default for StatusChannel {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(CAPACITY);
        Self { tx }
    }
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new receiver; it sees every event sent after this call
    pub fn subscribe(&self) -> Receiver<StatusEvent> {
        self.tx.subscribe()
    }

    pub fn send(&self, event: StatusEvent) {
        match event.level {
            StatusLevel::Info => tracing::info!(status = %event.message),
            StatusLevel::Error => tracing::warn!(status = %event.message),
        }
        // no subscriber is fine
        let _ = self.tx.send(event);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(StatusEvent::info(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(StatusEvent::error(message));
    }
}

/// Every event currently queued on `rx`; events overwritten while the
/// receiver lagged are skipped
pub fn drain(rx: &mut Receiver<StatusEvent>) -> Vec<StatusEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "status receiver lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return events,
        }
    }
}
