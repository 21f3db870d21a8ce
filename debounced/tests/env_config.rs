//! Environment overlay. Kept in its own test binary because it mutates the
//! process environment.

use debounced::{DebouncerBuilder, ENV_PREFIX};
use std::time::Duration;

#[test]
fn debounce_env_vars_set_delay_and_unit() {
    std::env::set_var(format!("{}_DELAY", ENV_PREFIX), "3");
    std::env::set_var(format!("{}_UNIT", ENV_PREFIX), "seconds");

    let builder = DebouncerBuilder::from_env().unwrap();
    assert_eq!(builder.resolve_delay().unwrap(), Duration::from_secs(3));

    std::env::remove_var(format!("{}_DELAY", ENV_PREFIX));
    std::env::remove_var(format!("{}_UNIT", ENV_PREFIX));
}
