//! Explicit store-event fan-out.
//!
//! Subscribers receive an event after the store has successfully written the
//! corresponding state, replacing implicit observers on shared globals.

use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    TransactionsChanged,
    RecurringRulesChanged,
    SettingsChanged,
}

/// Multi-subscriber event channel. Disconnected subscribers are pruned on
/// publish.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Sender<StoreEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: StoreEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
