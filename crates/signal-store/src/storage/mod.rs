//! 저장소 구현.

pub mod memory;
pub mod redis;

pub use memory::{FailingStore, MemoryStore};
pub use redis::RedisStore;
