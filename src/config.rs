//! Snackbar timing configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Three durations drive the queue: the debounce before a drain pass, how
//! long a shown message stays up, and the retention window after which an
//! undisplayed item is discarded. Deployments override them through env
//! vars; unparsable values fall back to the defaults.

use std::time::Duration;

pub const DEFAULT_DEBOUNCE_MS: u64 = 600;
pub const DEFAULT_DISPLAY_MS: u64 = 6000;
pub const DEFAULT_STALE_MS: u64 = 30_000;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnackbarConfig {
    /// Delay between a state change and the drain pass it triggers.
    pub debounce: Duration,
    /// How long a message stays on screen before auto-dismiss.
    pub display_duration: Duration,
    /// Age at which a pending item is dropped unseen.
    pub stale_window: Duration,
}

impl Default for SnackbarConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            display_duration: Duration::from_millis(DEFAULT_DISPLAY_MS),
            stale_window: Duration::from_millis(DEFAULT_STALE_MS),
        }
    }
}

impl SnackbarConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SNACKBAR_DEBOUNCE_MS`: default 600
    /// - `SNACKBAR_DISPLAY_MS`: default 6000
    /// - `SNACKBAR_STALE_MS`: default 30000
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting display duration or stale window is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = Self {
            debounce: Duration::from_millis(env_parse("SNACKBAR_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)),
            display_duration: Duration::from_millis(env_parse("SNACKBAR_DISPLAY_MS", DEFAULT_DISPLAY_MS)),
            stale_window: Duration::from_millis(env_parse("SNACKBAR_STALE_MS", DEFAULT_STALE_MS)),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_display_duration(mut self, display_duration: Duration) -> Self {
        self.display_duration = display_duration;
        self
    }

    #[must_use]
    pub fn with_stale_window(mut self, stale_window: Duration) -> Self {
        self.stale_window = stale_window;
        self
    }

    /// Reject durations that would make the queue useless. A zero debounce is
    /// fine: the drain just runs on the next scheduler turn.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroDuration` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_duration.is_zero() {
            return Err(ConfigError::ZeroDuration { field: "display_duration" });
        }
        if self.stale_window.is_zero() {
            return Err(ConfigError::ZeroDuration { field: "stale_window" });
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
