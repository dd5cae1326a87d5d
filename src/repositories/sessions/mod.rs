//! 세션 데이터 액세스 계층

pub mod memory_session_store;
pub mod session_repository;

pub use memory_session_store::MemorySessionStore;
pub use session_repository::{RedisSessionStore, SessionStore};
