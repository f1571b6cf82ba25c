//! Notification data model: requests, queued items, and the display snapshot.
//!
//! DESIGN
//! ======
//! A request carries the text, optional action buttons, and an optional route
//! restriction. Once enqueued it is stamped with an id and an enqueue instant.
//! `DisplayState` is what the view layer renders; it serializes to JSON with
//! action callbacks stripped.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

// =============================================================================
// ACTION
// =============================================================================

/// A button rendered next to the message.
#[derive(Clone, Serialize)]
pub struct Action {
    pub text: String,
    #[serde(skip)]
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl Action {
    #[must_use]
    pub fn new(text: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self { text: text.into(), callback: Arc::new(callback) }
    }

    /// Run the action's callback.
    pub fn invoke(&self) {
        (self.callback)();
    }

    /// Same text and the same callback instance.
    #[must_use]
    pub fn same_as(&self, other: &Action) -> bool {
        self.text == other.text && Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("text", &self.text).finish_non_exhaustive()
    }
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub message: String,
    pub actions: Option<Vec<Action>>,
    /// Only show while the active route equals this value.
    pub route: Option<String>,
}

impl NotificationRequest {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), actions: None, route: None }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Unrestricted requests are always eligible; routed ones only on their route.
    #[must_use]
    pub fn is_eligible(&self, active_route: Option<&str>) -> bool {
        match self.route.as_deref() {
            None => true,
            Some(route) => active_route == Some(route),
        }
    }
}

// =============================================================================
// QUEUED ITEM
// =============================================================================

#[derive(Debug, Clone)]
pub struct QueuedItem {
    pub id: Uuid,
    pub request: NotificationRequest,
    pub enqueued_at: Instant,
}

impl QueuedItem {
    #[must_use]
    pub fn new(request: NotificationRequest, enqueued_at: Instant) -> Self {
        Self { id: Uuid::new_v4(), request, enqueued_at }
    }

    /// True once the item has waited at least `window`.
    #[must_use]
    pub fn is_stale(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.enqueued_at) >= window
    }
}

// =============================================================================
// DISPLAY STATE
// =============================================================================

/// Observable snapshot of the snackbar slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayState {
    pub message: Option<String>,
    pub actions: Option<Vec<Action>>,
    pub active_route: Option<String>,
}

impl DisplayState {
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
#[path = "notification_test.rs"]
mod tests;
