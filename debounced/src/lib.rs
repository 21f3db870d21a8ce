//! # Debounced - Keyed Debounce Scheduling for Tokio
//!
//! This library coalesces bursts of calls into a single callback invocation.
//! Calls are grouped by key, so every search box, document or row gets its
//! own independent debounce window.
//!
//! ## Features
//!
//! - **Keyed windows**: each key debounces independently
//! - **Last call wins**: the callback receives the arguments of the last call in a burst
//! - **Flush and cancel**: deliver a pending call now, or drop it, per key or for all keys
//! - **Config support**: read the delay from TOML, YAML or `DEBOUNCE_*` environment variables
//! - **Shorthand delays**: `"250ms"`, `"2s"`, `"1m"` or `${config.key:default}` placeholders
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use debounced::DebouncerBuilder;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let search = DebouncerBuilder::new()
//!         .delay_str("250ms")
//!         .build_keyed(|query: String| println!("searching for {query}"))?;
//!
//!     search.debounce("users", "a".to_string())?;
//!     search.debounce("users", "al".to_string())?;
//!     search.debounce("users", "ali".to_string())?; // only this one is searched
//!
//!     tokio::time::sleep(Duration::from_millis(300)).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Create `config/debounce.toml`:
//!
//! ```toml
//! [debounce]
//! delay = "300ms"
//!
//! [search]
//! delay = "150ms"
//! ```
//!
//! Or `config/debounce.yaml`:
//!
//! ```yaml
//! debounce:
//!   delay: 300
//!   time_unit: milliseconds
//! ```
//!
//! You can also use environment variables with `DEBOUNCE_` prefix:
//!
//! ```bash
//! export DEBOUNCE_DELAY=500ms
//! export DEBOUNCE_UNIT=seconds
//! ```
//!
//! `DEBOUNCE_UNIT` maps onto `debounce.time_unit`, the unit for bare numeric delays.

// Re-export core types
pub use debounced_runtime::{
    load_env_config, load_toml_config, load_yaml_config, resolve_config_value, BuildError,
    Callback, DebounceKey, DebounceSettings, Debouncer, DebouncerBuilder, DelayValue,
    IntoDebounceKey, InvalidKeyError, InvalidKeyReason, KeyedDebouncer, Symbol, Thunk, TimeUnit,
    Timer, TokioTimer, DEFAULT_DELAY, ENV_PREFIX, SETTINGS_KEY,
};

// Make debounced_runtime available for custom timer implementations
pub use debounced_runtime;
