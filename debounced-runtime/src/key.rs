//! Keys identifying independent debounce streams.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{InvalidKeyError, InvalidKeyReason};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique key token.
///
/// Two symbols are equal only if one was cloned from the other, regardless of
/// their descriptions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    pub fn new() -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    pub fn with_description(description: impl Into<Arc<str>>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::new()
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol(#{}", self.id)?;
        if let Some(description) = &self.description {
            write!(f, " {:?}", description)?;
        }
        f.write_str(")")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    Text(Arc<str>),
    Integer(i128),
    // Non-integral finite values and infinities, compared by bit pattern.
    Float(u64),
    Symbol(Symbol),
}

/// A validated debounce key.
///
/// Every `DebounceKey` value is valid; construction goes through
/// [`IntoDebounceKey`], which rejects empty text, zero, `NaN` and non-primitive
/// values. Numbers with an integral value compare equal regardless of the
/// numeric type they were built from, so `7_u8`, `7_i64` and `7.0_f64` name
/// the same stream.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DebounceKey(Repr);

impl DebounceKey {
    /// Validate and convert any supported key value.
    pub fn new(value: impl IntoDebounceKey) -> Result<Self, InvalidKeyError> {
        value.into_debounce_key()
    }

    fn text(value: &str) -> Result<Self, InvalidKeyError> {
        if value.is_empty() {
            return Err(InvalidKeyError::new(InvalidKeyReason::Empty));
        }
        Ok(Self(Repr::Text(Arc::from(value))))
    }

    fn integer(value: i128) -> Result<Self, InvalidKeyError> {
        if value == 0 {
            return Err(InvalidKeyError::new(InvalidKeyReason::Zero));
        }
        Ok(Self(Repr::Integer(value)))
    }

    fn float(value: f64) -> Result<Self, InvalidKeyError> {
        if value.is_nan() {
            return Err(InvalidKeyError::new(InvalidKeyReason::NotANumber));
        }
        if value == 0.0 {
            return Err(InvalidKeyError::new(InvalidKeyReason::Zero));
        }
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e38 {
            return Self::integer(value as i128);
        }
        Ok(Self(Repr::Float(value.to_bits())))
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.0 {
            Repr::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self.0 {
            Repr::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.0 {
            Repr::Integer(value) => Some(value as f64),
            Repr::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match &self.0 {
            Repr::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl fmt::Debug for DebounceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Text(text) => write!(f, "{:?}", text),
            Repr::Integer(value) => write!(f, "{}", value),
            Repr::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Repr::Symbol(symbol) => write!(f, "{:?}", symbol),
        }
    }
}

impl fmt::Display for DebounceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Text(text) => f.write_str(text),
            Repr::Symbol(symbol) => match symbol.description() {
                Some(description) => write!(f, "Symbol({})", description),
                None => f.write_str("Symbol()"),
            },
            _ => write!(f, "{:?}", self),
        }
    }
}

/// Conversion into a validated [`DebounceKey`].
///
/// Implemented for text, the primitive numeric types, [`Symbol`], `Option`s
/// of those (where `None` is rejected) and dynamic `serde_json::Value`s.
pub trait IntoDebounceKey {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError>;
}

impl IntoDebounceKey for DebounceKey {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        Ok(self)
    }
}

impl IntoDebounceKey for &DebounceKey {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        Ok(self.clone())
    }
}

impl IntoDebounceKey for &str {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        DebounceKey::text(self)
    }
}

impl IntoDebounceKey for String {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        DebounceKey::text(&self)
    }
}

impl IntoDebounceKey for &String {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        DebounceKey::text(self)
    }
}

macro_rules! impl_integer_key {
    ($($ty:ty),*) => {
        $(
            impl IntoDebounceKey for $ty {
                fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
                    DebounceKey::integer(i128::from(self))
                }
            }
        )*
    };
}

impl_integer_key!(i8, i16, i32, i64, u8, u16, u32, u64);

impl IntoDebounceKey for usize {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        DebounceKey::integer(self as i128)
    }
}

impl IntoDebounceKey for isize {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        DebounceKey::integer(self as i128)
    }
}

impl IntoDebounceKey for f32 {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        DebounceKey::float(f64::from(self))
    }
}

impl IntoDebounceKey for f64 {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        DebounceKey::float(self)
    }
}

impl From<Symbol> for DebounceKey {
    fn from(symbol: Symbol) -> Self {
        Self(Repr::Symbol(symbol))
    }
}

impl IntoDebounceKey for Symbol {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        Ok(DebounceKey::from(self))
    }
}

impl IntoDebounceKey for &Symbol {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        Ok(DebounceKey::from(self.clone()))
    }
}

impl<T: IntoDebounceKey> IntoDebounceKey for Option<T> {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        match self {
            Some(value) => value.into_debounce_key(),
            None => Err(InvalidKeyError::new(InvalidKeyReason::Missing)),
        }
    }
}

impl IntoDebounceKey for &serde_json::Value {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        use serde_json::Value;

        match self {
            Value::Null => Err(InvalidKeyError::new(InvalidKeyReason::Missing)),
            Value::Bool(_) => Err(InvalidKeyError::new(InvalidKeyReason::WrongType("boolean"))),
            Value::Array(_) => Err(InvalidKeyError::new(InvalidKeyReason::WrongType("array"))),
            Value::Object(_) => Err(InvalidKeyError::new(InvalidKeyReason::WrongType("object"))),
            Value::String(text) => DebounceKey::text(text),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    DebounceKey::integer(i128::from(value))
                } else if let Some(value) = number.as_u64() {
                    DebounceKey::integer(i128::from(value))
                } else {
                    DebounceKey::float(number.as_f64().unwrap_or(f64::NAN))
                }
            }
        }
    }
}

impl IntoDebounceKey for serde_json::Value {
    fn into_debounce_key(self) -> Result<DebounceKey, InvalidKeyError> {
        (&self).into_debounce_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reason(result: Result<DebounceKey, InvalidKeyError>) -> InvalidKeyReason {
        result.expect_err("key should be rejected").reason()
    }

    #[test]
    fn accepts_non_empty_primitives() {
        assert!(DebounceKey::new("search").is_ok());
        assert!(DebounceKey::new(String::from("k")).is_ok());
        assert!(DebounceKey::new(42_u32).is_ok());
        assert!(DebounceKey::new(-1_i64).is_ok());
        assert!(DebounceKey::new(1.5_f64).is_ok());
        assert!(DebounceKey::new(f64::INFINITY).is_ok());
        assert!(DebounceKey::new(Symbol::new()).is_ok());
    }

    #[test]
    fn rejects_empty_text_and_zero() {
        assert_eq!(reason(DebounceKey::new("")), InvalidKeyReason::Empty);
        assert_eq!(reason(DebounceKey::new(0_i32)), InvalidKeyReason::Zero);
        assert_eq!(reason(DebounceKey::new(-0.0_f64)), InvalidKeyReason::Zero);
        assert_eq!(reason(DebounceKey::new(f64::NAN)), InvalidKeyReason::NotANumber);
        assert_eq!(reason(DebounceKey::new(None::<&str>)), InvalidKeyReason::Missing);
    }

    #[test]
    fn rejects_non_primitive_json_values() {
        assert_eq!(reason(DebounceKey::new(json!(null))), InvalidKeyReason::Missing);
        assert_eq!(
            reason(DebounceKey::new(json!(false))),
            InvalidKeyReason::WrongType("boolean")
        );
        assert_eq!(
            reason(DebounceKey::new(json!({ "id": 1 }))),
            InvalidKeyReason::WrongType("object")
        );
        assert_eq!(
            reason(DebounceKey::new(json!([1, 2]))),
            InvalidKeyReason::WrongType("array")
        );
        assert_eq!(reason(DebounceKey::new(json!(""))), InvalidKeyReason::Empty);
        assert_eq!(reason(DebounceKey::new(json!(0))), InvalidKeyReason::Zero);
    }

    #[test]
    fn numbers_with_the_same_value_are_the_same_key() {
        let a = DebounceKey::new(7_u8).unwrap();
        let b = DebounceKey::new(7_i64).unwrap();
        let c = DebounceKey::new(7.0_f64).unwrap();
        let d = DebounceKey::new(json!(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c, d);
        assert_ne!(a, DebounceKey::new("7").unwrap());
    }

    #[test]
    fn symbols_are_unique_tokens() {
        let first = Symbol::with_description("row");
        let second = Symbol::with_description("row");
        let a = DebounceKey::new(&first).unwrap();
        assert_eq!(a, DebounceKey::new(first.clone()).unwrap());
        assert_ne!(a, DebounceKey::new(second).unwrap());
        assert_eq!(a.as_symbol().and_then(Symbol::description), Some("row"));
    }

    #[test]
    fn error_message_matches_the_contract() {
        let err = DebounceKey::new("").unwrap_err();
        assert_eq!(err.to_string(), "Key is required for debouncing");
    }
}
