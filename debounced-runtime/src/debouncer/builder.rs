use std::sync::Arc;
use std::time::Duration;

use config::Config;
use tokio::runtime::Handle;
use tracing::info;

use super::keyed::KeyedDebouncer;
use super::single::Debouncer;
use crate::config::{
    load_env_config, load_toml_config, load_yaml_config, resolve_config_value, DebounceSettings,
};
use crate::error::BuildError;
use crate::time_unit::TimeUnit;
use crate::timer::TokioTimer;

/// Delay used when neither code nor configuration sets one
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

enum DelaySource {
    Fixed(Duration),
    Expr(String),
}

/// Builder for debouncers
///
/// The delay comes from, in order: [`delay`](Self::delay) or
/// [`delay_str`](Self::delay_str), the `[debounce]` table of the loaded
/// configuration, then [`DEFAULT_DELAY`].
pub struct DebouncerBuilder {
    config: Config,
    delay: Option<DelaySource>,
    time_unit: Option<TimeUnit>,
    timer: Option<TokioTimer>,
}

impl Default for DebouncerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DebouncerBuilder {
    /// Create a new builder with default config (empty)
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create with TOML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// Configuration errors should be caught early during setup.
    pub fn with_toml(path: &str) -> Self {
        let config = load_toml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load TOML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create with YAML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// Configuration errors should be caught early during setup.
    pub fn with_yaml(path: &str) -> Self {
        let config = load_yaml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load YAML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create from `DEBOUNCE_*` environment variables only
    pub fn from_env() -> Result<Self, BuildError> {
        Ok(Self::with_config(load_env_config()?))
    }

    /// Create with custom config
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            delay: None,
            time_unit: None,
            timer: None,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(DelaySource::Fixed(delay));
        self
    }

    /// Set the delay from text: `"250"`, `"250ms"`, `"2s"`, or a config
    /// placeholder such as `"${search.delay:250ms}"`.
    pub fn delay_str(mut self, delay: impl Into<String>) -> Self {
        self.delay = Some(DelaySource::Expr(delay.into()));
        self
    }

    /// Unit for bare numeric delays (milliseconds by default)
    pub fn time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = Some(time_unit);
        self
    }

    /// Drive timers on a specific runtime instead of the current one
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.timer = Some(TokioTimer::new(runtime));
        self
    }

    /// Work out the effective delay without building anything.
    pub fn resolve_delay(&self) -> Result<Duration, BuildError> {
        let settings = DebounceSettings::from_config(&self.config)?;
        let unit = match self.time_unit {
            Some(unit) => unit,
            None => settings.time_unit()?.unwrap_or_default(),
        };

        match &self.delay {
            Some(DelaySource::Fixed(delay)) => Ok(*delay),
            Some(DelaySource::Expr(expr)) => {
                let resolved = resolve_config_value(expr, &self.config)?;
                unit.resolve_delay(&resolved)
                    .ok_or(BuildError::InvalidDelay(resolved))
            }
            None => Ok(settings.delay(unit)?.unwrap_or(DEFAULT_DELAY)),
        }
    }

    fn into_parts(self) -> Result<(TokioTimer, Duration), BuildError> {
        let delay = self.resolve_delay()?;
        let timer = match self.timer {
            Some(timer) => timer,
            None => TokioTimer::try_current()?,
        };
        Ok((timer, delay))
    }

    /// Build a keyed debouncer whose `debounce` calls use `callback`
    pub fn build_keyed<A, F>(self, callback: F) -> Result<KeyedDebouncer<A>, BuildError>
    where
        A: Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        let (timer, delay) = self.into_parts()?;
        info!(?delay, "Building keyed debouncer");
        Ok(KeyedDebouncer::from_parts(timer, Arc::new(callback), delay))
    }

    /// Build a single-stream debouncer
    pub fn build<A, F>(self, callback: F) -> Result<Debouncer<A>, BuildError>
    where
        A: Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        let (timer, delay) = self.into_parts()?;
        info!(?delay, "Building debouncer");
        Ok(Debouncer::from_keyed(KeyedDebouncer::from_parts(
            timer,
            Arc::new(callback),
            delay,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(key: &str, value: &str) -> Config {
        Config::builder()
            .set_override(key, value)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn defaults_to_three_hundred_millis() {
        assert_eq!(DebouncerBuilder::new().resolve_delay().unwrap(), DEFAULT_DELAY);
    }

    #[test]
    fn explicit_delay_wins_over_config() {
        let builder = DebouncerBuilder::with_config(config_with("debounce.delay", "2s"))
            .delay(Duration::from_millis(40));
        assert_eq!(builder.resolve_delay().unwrap(), Duration::from_millis(40));
    }

    #[test]
    fn delay_comes_from_the_debounce_table() {
        let builder = DebouncerBuilder::with_config(config_with("debounce.delay", "2s"));
        assert_eq!(builder.resolve_delay().unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn placeholder_delays_use_the_time_unit() {
        let builder = DebouncerBuilder::with_config(config_with("search.delay", "3"))
            .delay_str("${search.delay}")
            .time_unit(TimeUnit::Seconds);
        assert_eq!(builder.resolve_delay().unwrap(), Duration::from_secs(3));

        let builder = DebouncerBuilder::new().delay_str("${search.delay:125ms}");
        assert_eq!(builder.resolve_delay().unwrap(), Duration::from_millis(125));
    }

    #[test]
    fn invalid_delay_text_is_an_error() {
        let result = DebouncerBuilder::new().delay_str("whenever").resolve_delay();
        assert!(matches!(result, Err(BuildError::InvalidDelay(text)) if text == "whenever"));
    }

    #[test]
    fn building_outside_a_runtime_fails() {
        let result = DebouncerBuilder::new().build_keyed(|_: u32| {});
        assert!(matches!(result, Err(BuildError::NoRuntime(_))));
    }

    #[test]
    fn explicit_runtime_handle_allows_building_anywhere() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let debouncer = DebouncerBuilder::new()
            .runtime(runtime.handle().clone())
            .delay(Duration::from_millis(5))
            .build(|_: u32| {})
            .unwrap();
        assert_eq!(debouncer.delay(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn built_keyed_debouncer_uses_resolved_delay() {
        let calls = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = calls.clone();
        let debouncer = DebouncerBuilder::new()
            .delay_str("50ms")
            .build_keyed(move |n: u32| sink.lock().push(n))
            .unwrap();

        debouncer.debounce("a", 1).unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(calls.lock().is_empty());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*calls.lock(), vec![1]);
    }
}
