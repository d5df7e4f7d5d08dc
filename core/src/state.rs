//! Loading/error/notice state shown by the view layer.
//!
//! # Design
//! `UiState` is a cheap-to-clone handle over one shared store. The gateway
//! is its only writer for loading and error; the view reads it through
//! `snapshot()`.
//!
//! Updates are ordered by ticket. Every call takes a ticket in `begin()`,
//! and the store remembers which ticket wrote the visible error. A failure
//! always reaches the banner unless a newer call's failure is already
//! showing there.
//! Loading is derived from the number of calls in flight rather than a flag
//! that the last finisher clears.

use std::sync::{Arc, Mutex, MutexGuard};

/// Point-in-time copy of the UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Default)]
struct Store {
    in_flight: usize,
    latest_ticket: u64,
    error_ticket: u64,
    error: Option<String>,
    notice: Option<String>,
}

/// Shared handle to the loading/error/notice store.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    store: Arc<Mutex<Store>>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> UiSnapshot {
        let store = self.lock();
        UiSnapshot {
            loading: store.in_flight > 0,
            error: store.error.clone(),
            notice: store.notice.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn notice(&self) -> Option<String> {
        self.lock().notice.clone()
    }

    /// Start a call: loading on, banners cleared.
    ///
    /// Loading stays on until the returned guard is dropped.
    #[must_use = "dropping the guard immediately ends the loading period"]
    pub fn begin(&self) -> InFlight {
        let mut store = self.lock();
        store.in_flight += 1;
        store.latest_ticket += 1;
        store.error_ticket = 0;
        store.error = None;
        store.notice = None;
        InFlight {
            state: self.clone(),
            ticket: store.latest_ticket,
        }
    }

    /// Show a success notice. Replaces any visible error.
    pub fn notify(&self, text: impl Into<String>) {
        let mut store = self.lock();
        store.error_ticket = 0;
        store.error = None;
        store.notice = Some(text.into());
    }

    /// Hide both the error banner and the notice.
    pub fn dismiss(&self) {
        let mut store = self.lock();
        store.error_ticket = 0;
        store.error = None;
        store.notice = None;
    }
}

/// Guard for one in-flight call. Dropping it ends the call's loading period.
#[derive(Debug)]
pub struct InFlight {
    state: UiState,
    ticket: u64,
}

impl InFlight {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Record this call's failure banner.
    ///
    /// Returns `false` without writing when the banner already shows the
    /// failure of a newer call.
    pub fn fail(&self, text: impl Into<String>) -> bool {
        let mut store = self.state.lock();
        if store.error.is_some() && store.error_ticket > self.ticket {
            return false;
        }
        store.error_ticket = self.ticket;
        store.notice = None;
        store.error = Some(text.into());
        true
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut store = self.state.lock();
        store.in_flight = store.in_flight.saturating_sub(1);
    }
}
