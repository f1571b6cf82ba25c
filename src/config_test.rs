use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold `env_guard()` so env mutations do not race.
unsafe fn clear_snackbar_env() {
    unsafe {
        std::env::remove_var("SNACKBAR_DEBOUNCE_MS");
        std::env::remove_var("SNACKBAR_DISPLAY_MS");
        std::env::remove_var("SNACKBAR_STALE_MS");
    }
}

#[test]
fn default_matches_reference_timings() {
    let cfg = SnackbarConfig::default();
    assert_eq!(cfg.debounce, Duration::from_millis(600));
    assert_eq!(cfg.display_duration, Duration::from_millis(6000));
    assert_eq!(cfg.stale_window, Duration::from_millis(30_000));
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_env_defaults_when_unset() {
    let _env = env_guard();
    unsafe { clear_snackbar_env() };

    let cfg = SnackbarConfig::from_env().unwrap();
    assert_eq!(cfg, SnackbarConfig::default());
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_guard();
    unsafe {
        clear_snackbar_env();
        std::env::set_var("SNACKBAR_DEBOUNCE_MS", "250");
        std::env::set_var("SNACKBAR_DISPLAY_MS", "8000");
        std::env::set_var("SNACKBAR_STALE_MS", "45000");
    }

    let cfg = SnackbarConfig::from_env().unwrap();
    assert_eq!(cfg.debounce, Duration::from_millis(250));
    assert_eq!(cfg.display_duration, Duration::from_millis(8000));
    assert_eq!(cfg.stale_window, Duration::from_millis(45_000));

    unsafe { clear_snackbar_env() };
}

#[test]
fn from_env_ignores_garbage() {
    let _env = env_guard();
    unsafe {
        clear_snackbar_env();
        std::env::set_var("SNACKBAR_DISPLAY_MS", "six seconds");
    }

    let cfg = SnackbarConfig::from_env().unwrap();
    assert_eq!(cfg.display_duration, Duration::from_millis(DEFAULT_DISPLAY_MS));

    unsafe { clear_snackbar_env() };
}

#[test]
fn from_env_rejects_zero_display() {
    let _env = env_guard();
    unsafe {
        clear_snackbar_env();
        std::env::set_var("SNACKBAR_DISPLAY_MS", "0");
    }

    let err = SnackbarConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::ZeroDuration { field: "display_duration" });
    assert_eq!(err.to_string(), "display_duration must be greater than zero");

    unsafe { clear_snackbar_env() };
}

// =============================================================================
// Builders / validate
// =============================================================================

#[test]
fn builders_override_fields() {
    let cfg = SnackbarConfig::default()
        .with_debounce(Duration::ZERO)
        .with_display_duration(Duration::from_secs(8))
        .with_stale_window(Duration::from_secs(5));
    assert_eq!(cfg.debounce, Duration::ZERO);
    assert_eq!(cfg.display_duration, Duration::from_secs(8));
    assert_eq!(cfg.stale_window, Duration::from_secs(5));
}

#[test]
fn zero_debounce_is_valid() {
    let cfg = SnackbarConfig::default().with_debounce(Duration::ZERO);
    assert!(cfg.validate().is_ok());
}

#[test]
fn zero_stale_window_is_rejected() {
    let cfg = SnackbarConfig::default().with_stale_window(Duration::ZERO);
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroDuration { field: "stale_window" }));
}
