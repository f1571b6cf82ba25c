//! Snackbar store, the notification queue manager.
//!
//! DESIGN
//! ======
//! One pending queue, one display slot, two timers. Every mutation runs a
//! dirty check: when nothing is showing and the queue is non-empty, a single
//! debounced drain task is scheduled. The drain sweeps stale items, promotes
//! the oldest eligible item into the display slot, and arms the auto-dismiss
//! timer. Dismissal clears the slot, which re-runs the dirty check.
//!
//! Hosts construct a `SnackbarStore` and pass clones to whoever needs it.
//! Timer tasks hold a weak reference, so dropping the last handle tears the
//! store down and aborts both timers.
//!
//! TRADE-OFFS
//! ==========
//! The stale sweep only runs inside a drain, and a drain only runs while the
//! slot is empty. A message that is always showing blocks reclamation;
//! `pending_len` is exposed so hosts can watch for it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{ConfigError, SnackbarConfig};
use crate::notification::{Action, DisplayState, NotificationRequest, QueuedItem};
use crate::queue::{PendingQueue, QueueError};

// =============================================================================
// INNER STATE
// =============================================================================

struct Inner {
    config: SnackbarConfig,
    runtime: Handle,
    pending: PendingQueue,
    display: DisplayState,
    /// Auto-dismiss timer for the message currently showing.
    dismiss_timer: Option<JoinHandle<()>>,
    /// Debounced drain task, if one is in flight.
    drain_timer: Option<JoinHandle<()>>,
    /// Ticket of the drain task stored in `drain_timer`.
    drain_ticket: u64,
    /// Bumped on every show and dismiss so an outdated timer is a no-op.
    generation: u64,
    closed: bool,
    publisher: watch::Sender<DisplayState>,
}

impl Inner {
    fn abort_timers(&mut self) {
        if let Some(handle) = self.dismiss_timer.take() {
            handle.abort();
        }
        if let Some(handle) = self.drain_timer.take() {
            handle.abort();
        }
    }

    /// Push the display state to subscribers, waking them only on a real change.
    fn publish(&self) {
        let display = &self.display;
        self.publisher.send_if_modified(|seen| {
            if same_display(seen, display) {
                return false;
            }
            *seen = display.clone();
            true
        });
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.abort_timers();
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Shared handle to the notification queue. Clones refer to the same queue.
#[derive(Clone)]
pub struct SnackbarStore {
    inner: Arc<Mutex<Inner>>,
}

impl SnackbarStore {
    /// Create a store whose timers run on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime context.
    #[must_use]
    pub fn new(config: SnackbarConfig) -> Self {
        Self::with_runtime(config, Handle::current())
    }

    /// Create a store whose timers run on `runtime`. Public operations may then
    /// be called from any thread.
    #[must_use]
    pub fn with_runtime(config: SnackbarConfig, runtime: Handle) -> Self {
        let (publisher, _) = watch::channel(DisplayState::default());
        let inner = Inner {
            config,
            runtime,
            pending: PendingQueue::new(),
            display: DisplayState::default(),
            dismiss_timer: None,
            drain_timer: None,
            drain_ticket: 0,
            generation: 0,
            closed: false,
            publisher,
        };
        Self { inner: Arc::new(Mutex::new(inner)) }
    }

    /// Create a store configured from `SNACKBAR_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment yields an invalid config.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime context.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(SnackbarConfig::from_env()?))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Public operations
    // -------------------------------------------------------------------------

    /// Queue a notification. Display happens on a later drain pass.
    /// Returns `None` once the store has been shut down.
    pub fn enqueue_message(&self, request: NotificationRequest) -> Option<Uuid> {
        let mut inner = self.lock();
        if inner.closed {
            warn!(message = %request.message, "enqueue after shutdown ignored");
            return None;
        }
        let id = inner.pending.push(request, Instant::now());
        debug!(%id, pending = inner.pending.len(), "notification enqueued");
        self.after_change(&mut inner);
        Some(id)
    }

    /// Clear the display slot immediately and cancel its auto-dismiss timer.
    pub fn dismiss(&self) {
        let mut inner = self.lock();
        if inner.closed {
            return;
        }
        if let Some(handle) = inner.dismiss_timer.take() {
            handle.abort();
        }
        clear_display(&mut inner);
        self.after_change(&mut inner);
    }

    /// Record the route the host is now showing. Affects future drains only.
    pub fn set_active_route(&self, route: impl Into<String>) {
        let mut inner = self.lock();
        if inner.closed {
            warn!("route change after shutdown ignored");
            return;
        }
        let route = route.into();
        debug!(%route, "active route changed");
        inner.display.active_route = Some(route);
        self.after_change(&mut inner);
    }

    /// Alias of [`set_active_route`](Self::set_active_route) using router naming.
    pub fn set_route_full_path(&self, full_path: impl Into<String>) {
        self.set_active_route(full_path);
    }

    /// Run a drain pass right now instead of waiting for the debounce.
    /// Returns whether a message was promoted to the display slot.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the pending queue's bookkeeping is corrupt.
    pub fn drain_now(&self) -> Result<bool, QueueError> {
        let mut inner = self.lock();
        if let Some(handle) = inner.drain_timer.take() {
            handle.abort();
        }
        self.drain(&mut inner)
    }

    /// Stop both timers and refuse further mutations.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        inner.abort_timers();
        info!(pending = inner.pending.len(), "snackbar store shut down");
    }

    // -------------------------------------------------------------------------
    // Observables
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.lock().display.message.clone()
    }

    #[must_use]
    pub fn actions(&self) -> Option<Vec<Action>> {
        self.lock().display.actions.clone()
    }

    #[must_use]
    pub fn active_route(&self) -> Option<String> {
        self.lock().display.active_route.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> DisplayState {
        self.lock().display.clone()
    }

    /// Receive every display change. The receiver starts at the current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.lock().publisher.subscribe()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.lock().closed
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Publish the new display state and schedule a drain if one is due.
    fn after_change(&self, inner: &mut Inner) {
        inner.publish();
        self.schedule_drain(inner);
    }

    fn schedule_drain(&self, inner: &mut Inner) {
        if inner.closed || inner.display.is_showing() || inner.pending.is_empty() || inner.drain_timer.is_some() {
            return;
        }

        inner.drain_ticket += 1;
        let ticket = inner.drain_ticket;
        let weak = Arc::downgrade(&self.inner);
        let delay = inner.config.debounce;
        let deadline = Instant::now() + delay;
        debug!(pending = inner.pending.len(), ?delay, ticket, "drain scheduled");
        inner.drain_timer = Some(inner.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(store) = upgrade(&weak) {
                store.run_scheduled_drain(ticket);
            }
        }));
    }

    fn run_scheduled_drain(&self, ticket: u64) {
        let result = {
            let mut inner = self.lock();
            // Only release the slot if it still holds this task; a task whose
            // abort came too late must not orphan its replacement. Detach
            // rather than abort: this is the task currently running.
            if inner.drain_ticket == ticket {
                inner.drain_timer = None;
            }
            self.drain(&mut inner)
        };
        if let Err(e) = result {
            error!(error = %e, "snackbar queue invariant violated");
            panic!("snackbar queue invariant violated: {e}");
        }
    }

    fn drain(&self, inner: &mut Inner) -> Result<bool, QueueError> {
        if inner.closed || inner.display.is_showing() {
            return Ok(false);
        }

        let stale_window = inner.config.stale_window;
        let dropped = inner.pending.collect_stale(Instant::now(), stale_window);
        if dropped > 0 {
            info!(dropped, pending = inner.pending.len(), "stale notifications discarded");
        }

        let active_route = inner.display.active_route.clone();
        let Some(item) = inner.pending.take_next_eligible(active_route.as_deref())? else {
            debug!(pending = inner.pending.len(), route = ?active_route, "no eligible notification");
            if dropped > 0 {
                self.after_change(inner);
            }
            return Ok(false);
        };

        self.show(inner, item);
        Ok(true)
    }

    fn show(&self, inner: &mut Inner, item: QueuedItem) {
        inner.generation += 1;
        let generation = inner.generation;
        let QueuedItem { id, request, .. } = item;

        info!(%id, message = %request.message, pending = inner.pending.len(), "showing notification");
        inner.display.message = Some(request.message);
        inner.display.actions = request.actions;

        if let Some(handle) = inner.dismiss_timer.take() {
            handle.abort();
        }
        let weak = Arc::downgrade(&self.inner);
        let deadline = Instant::now() + inner.config.display_duration;
        inner.dismiss_timer = Some(inner.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(store) = upgrade(&weak) {
                store.expire(generation);
            }
        }));

        self.after_change(inner);
    }

    /// Auto-dismiss path. Ignored if the message it was armed for is gone.
    fn expire(&self, generation: u64) {
        let mut inner = self.lock();
        if inner.closed || inner.generation != generation {
            return;
        }
        inner.dismiss_timer = None;
        debug!("notification timed out");
        clear_display(&mut inner);
        self.after_change(&mut inner);
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn upgrade(weak: &Weak<Mutex<Inner>>) -> Option<SnackbarStore> {
    weak.upgrade().map(|inner| SnackbarStore { inner })
}

fn same_display(a: &DisplayState, b: &DisplayState) -> bool {
    a.message == b.message && a.active_route == b.active_route && same_actions(a.actions.as_deref(), b.actions.as_deref())
}

fn same_actions(a: Option<&[Action]>, b: Option<&[Action]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.len() == b.len() && a.iter().zip(b).all(|(l, r)| l.same_as(r)),
        _ => false,
    }
}

fn clear_display(inner: &mut Inner) {
    if inner.display.is_showing() {
        info!("notification dismissed");
    }
    inner.generation += 1;
    inner.display.message = None;
    inner.display.actions = None;
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
