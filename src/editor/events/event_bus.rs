//! # Event Bus
//!
//! Central event distribution system for decoupled communication between the
//! live model and its observers using the observer pattern.
//!
//! Delivery is synchronous: `emit` returns once every listener registered on the
//! channel has returned, in registration order. Callers can therefore treat a
//! returned `emit` as "all observers have processed this change".

use super::model_events::{Channel, ModelEvent};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Type alias for model event handlers to reduce complexity
pub type ModelEventHandler = Arc<dyn Fn(&ModelEvent) + Send + Sync>;

/// Opaque handle returned by `add_listener`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    channel: Channel,
    id: u64,
}

impl ListenerHandle {
    /// Channel the listener was registered on
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

/// Wiring errors reported by the event bus
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventBusError {
    #[error("listener {handle:?} is not registered on channel '{channel}'")]
    NotRegistered {
        channel: Channel,
        handle: ListenerHandle,
    },
}

/// Event bus for decoupled communication between components
pub trait EventBus: Send + Sync {
    /// Register a listener on a channel; listeners run in registration order
    fn add_listener(&self, channel: Channel, handler: ModelEventHandler) -> ListenerHandle;

    /// Remove a previously registered listener.
    ///
    /// Removing a handle twice, or on a different channel, is a wiring bug and
    /// reported as `EventBusError::NotRegistered`.
    fn remove_listener(&self, channel: Channel, handle: ListenerHandle)
        -> Result<(), EventBusError>;

    /// Deliver an event to every listener of its channel
    fn emit(&self, event: ModelEvent);

    /// Remember the event as the channel's saved value, then emit it
    fn emit_and_save(&self, event: ModelEvent);

    /// Replace the saved value of the event's channel without notifying anyone
    fn save(&self, event: ModelEvent);

    /// Last value saved on the channel, if any
    fn saved(&self, channel: Channel) -> Option<ModelEvent>;

    /// Forget the saved value of a channel without notifying anyone
    fn clear_saved(&self, channel: Channel);

    /// Number of listeners currently registered on a channel
    fn listener_count(&self, channel: Channel) -> usize;
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    listeners: HashMap<Channel, Vec<(u64, ModelEventHandler)>>,
    saved: HashMap<Channel, ModelEvent>,
}

/// Simple in-memory event bus implementation
///
/// The listener list of a channel is snapshotted before delivery, so listeners
/// may add or remove listeners while an event is in flight without changing who
/// receives that event.
#[derive(Default)]
pub struct SimpleEventBus {
    state: Mutex<BusState>,
    debug_mode: bool,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus that logs emits nobody listens to
    pub fn with_debug_mode(debug_mode: bool) -> Self {
        Self {
            state: Mutex::new(BusState::default()),
            debug_mode,
        }
    }

    fn state(&self) -> MutexGuard<'_, BusState> {
        // A panicking listener never holds the lock, so the state stays consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventBus for SimpleEventBus {
    fn add_listener(&self, channel: Channel, handler: ModelEventHandler) -> ListenerHandle {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.entry(channel).or_default().push((id, handler));
        ListenerHandle { channel, id }
    }

    fn remove_listener(
        &self,
        channel: Channel,
        handle: ListenerHandle,
    ) -> Result<(), EventBusError> {
        let mut state = self.state();
        let position = state.listeners.get(&channel).and_then(|listeners| {
            listeners
                .iter()
                .position(|(id, _)| handle.channel == channel && *id == handle.id)
        });

        match position {
            Some(index) => {
                if let Some(listeners) = state.listeners.get_mut(&channel) {
                    listeners.remove(index);
                }
                Ok(())
            }
            None => Err(EventBusError::NotRegistered { channel, handle }),
        }
    }

    fn emit(&self, event: ModelEvent) {
        let channel = event.channel();
        let snapshot: Vec<ModelEventHandler> = {
            let state = self.state();
            state
                .listeners
                .get(&channel)
                .map(|listeners| listeners.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        if snapshot.is_empty() {
            if self.debug_mode {
                tracing::debug!("No listeners for '{}', dropping {:?}", channel, event);
            }
            return;
        }

        tracing::trace!("Emitting {:?} to {} listener(s)", event, snapshot.len());
        for handler in snapshot {
            handler(&event);
        }
    }

    fn emit_and_save(&self, event: ModelEvent) {
        self.save(event.clone());
        self.emit(event);
    }

    fn save(&self, event: ModelEvent) {
        self.state().saved.insert(event.channel(), event);
    }

    fn saved(&self, channel: Channel) -> Option<ModelEvent> {
        self.state().saved.get(&channel).cloned()
    }

    fn clear_saved(&self, channel: Channel) {
        self.state().saved.remove(&channel);
    }

    fn listener_count(&self, channel: Channel) -> usize {
        self.state()
            .listeners
            .get(&channel)
            .map(Vec::len)
            .unwrap_or(0)
    }
}
