//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소마다 trait을 두고 운영용 구현(MongoDB, Redis)과
//! 메모리 구현을 함께 제공합니다. 서비스는 `Arc<dyn ...>`로 trait에만 의존합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{InMemoryUserRepository, UserStore};
//!
//! let users: Arc<dyn UserStore> = Arc::new(InMemoryUserRepository::new());
//! let user = users.find_by_username("alice").await?;
//! ```

pub mod sessions;
pub mod users;
