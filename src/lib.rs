//! Route-aware snackbar notification queue.
//!
//! DESIGN
//! ======
//! `SnackbarStore` owns a FIFO of pending notifications and one display
//! slot. Producers enqueue; a debounced drain promotes the oldest item whose
//! route restriction matches the active route; an auto-dismiss timer frees
//! the slot again. Items that never become eligible are dropped after the
//! stale window. The view layer reads the slot or subscribes to changes.

pub mod config;
pub mod deep_equal;
pub mod notification;
pub mod queue;
pub mod store;

pub use config::{ConfigError, SnackbarConfig};
pub use deep_equal::deep_equal;
pub use notification::{Action, DisplayState, NotificationRequest, QueuedItem};
pub use queue::{PendingQueue, QueueError};
pub use store::SnackbarStore;
