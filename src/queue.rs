//! Pending notification list.
//!
//! DESIGN
//! ======
//! Items are appended at the tail and may leave from anywhere: the stale
//! sweep drops expired items, and selection removes the first eligible one.
//! Ineligible items keep their position so they show in order once their
//! route becomes active. The clock is passed in so the sweep and selection
//! stay deterministic under test.
//!
//! TRADE-OFFS
//! ==========
//! There is no capacity bound. The stale sweep is the only reclamation path
//! and it runs only as part of a drain pass.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::notification::{NotificationRequest, QueuedItem};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueueError {
    /// A slot inside the scanned range was absent. The index bookkeeping is
    /// corrupt; callers must not continue.
    #[error("pending queue slot {index} missing (len {len})")]
    MissingSlot { index: usize, len: usize },
}

// =============================================================================
// PENDING QUEUE
// =============================================================================

#[derive(Debug, Default)]
pub struct PendingQueue {
    items: VecDeque<QueuedItem>,
}

impl PendingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request stamped with `now`, returning its id.
    pub fn push(&mut self, request: NotificationRequest, now: Instant) -> Uuid {
        let item = QueuedItem::new(request, now);
        let id = item.id;
        self.items.push_back(item);
        id
    }

    /// Drop every item at least `window` old. Returns how many were removed.
    pub fn collect_stale(&mut self, now: Instant, window: Duration) -> usize {
        let before = self.items.len();
        self.items.retain(|item| {
            let stale = item.is_stale(now, window);
            if stale {
                debug!(id = %item.id, route = ?item.request.route, "discarding stale notification");
            }
            !stale
        });
        before - self.items.len()
    }

    /// Remove and return the oldest item eligible under `active_route`.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MissingSlot` if an index inside the scanned range
    /// has no item.
    pub fn take_next_eligible(&mut self, active_route: Option<&str>) -> Result<Option<QueuedItem>, QueueError> {
        let len = self.items.len();
        for index in 0..len {
            let item = self.items.get(index).ok_or(QueueError::MissingSlot { index, len })?;
            if item.request.is_eligible(active_route) {
                let item = self.items.remove(index).ok_or(QueueError::MissingSlot { index, len })?;
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedItem> {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod tests;
