pub mod counter;
pub mod code;

pub use counter::{CounterStore, InMemoryCounterStore, RedisCounterStore};
pub use code::{format_code, CodeGenerator};
