//! Debounced Runtime - Core runtime for keyed debounce scheduling
//!
//! This crate provides the timers, keys and debouncers behind `debounced`.

mod config;
mod debouncer;
mod error;
mod key;
mod time_unit;
mod timer;

// Re-export public API
pub use self::config::{
    load_env_config, load_toml_config, load_yaml_config, resolve_config_value, DebounceSettings,
    DelayValue, ENV_PREFIX, SETTINGS_KEY,
};
pub use debouncer::{Callback, Debouncer, DebouncerBuilder, KeyedDebouncer, DEFAULT_DELAY};
pub use error::{BuildError, InvalidKeyError, InvalidKeyReason};
pub use key::{DebounceKey, IntoDebounceKey, Symbol};
pub use time_unit::TimeUnit;
pub use timer::{Thunk, Timer, TokioTimer};
