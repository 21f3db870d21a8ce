use thiserror::Error;

/// Returned when a value cannot identify a debounce stream.
///
/// Only non-empty primitives are keys: text, numbers and symbols. Empty text,
/// the number zero, `NaN`, absent values, booleans, objects and arrays are all
/// rejected before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Key is required for debouncing")]
pub struct InvalidKeyError {
    reason: InvalidKeyReason,
}

impl InvalidKeyError {
    pub(crate) fn new(reason: InvalidKeyReason) -> Self {
        Self { reason }
    }

    /// Why the key was rejected.
    pub fn reason(&self) -> InvalidKeyReason {
        self.reason
    }
}

/// Cause of an [`InvalidKeyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKeyReason {
    /// Empty text.
    Empty,
    /// The number zero. Kept invalid for compatibility with falsy-key checks.
    Zero,
    /// `NaN`.
    NotANumber,
    /// No value at all (`None`, `null`).
    Missing,
    /// A value that is not a primitive key type.
    WrongType(&'static str),
}

impl std::fmt::Display for InvalidKeyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidKeyReason::Empty => f.write_str("empty text"),
            InvalidKeyReason::Zero => f.write_str("zero"),
            InvalidKeyReason::NotANumber => f.write_str("NaN"),
            InvalidKeyReason::Missing => f.write_str("missing value"),
            InvalidKeyReason::WrongType(kind) => write!(f, "{} is not a key type", kind),
        }
    }
}

/// Errors raised while assembling a debouncer from code or configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configuration could not be loaded or deserialized.
    #[error("failed to load debounce configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// A `${...}` placeholder named a key the configuration does not have.
    #[error("unresolved config placeholder: {0}")]
    UnresolvedPlaceholder(String),

    /// The delay is neither a bare number nor a shorthand like `250ms`.
    #[error("invalid delay value: {0}")]
    InvalidDelay(String),

    /// The time unit is not one of the known unit names.
    #[error("invalid time unit: {0}")]
    InvalidTimeUnit(String),

    /// No timer was given and the caller is not inside a Tokio runtime.
    #[error("no Tokio runtime available to drive debounce timers")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
