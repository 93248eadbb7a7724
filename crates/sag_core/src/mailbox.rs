//! Single-slot hand-off between one producer thread and one consumer thread.
//!
//! The producer overwrites whatever is in the slot; the consumer takes the
//! slot at most once per poll. Only the newest value survives, which is what
//! the simulation wants for "current input direction".

use std::sync::{Mutex, PoisonError};

pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Deposit a value, replacing any value not yet taken.
    pub fn post(&self, value: T) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(value);
    }

    /// Remove and return the pending value, if any.
    pub fn take(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}
