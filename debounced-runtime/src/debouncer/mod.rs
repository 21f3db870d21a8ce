mod builder;
mod keyed;
mod single;

pub use builder::{DebouncerBuilder, DEFAULT_DELAY};
pub use keyed::{Callback, KeyedDebouncer};
pub use single::Debouncer;
