//! 사용자 데이터 액세스 계층
//!
//! [`UserStore`](user_repo::UserStore) trait과 두 가지 구현을 제공합니다.
//!
//! - [`MongoUserRepository`](user_repo::MongoUserRepository): 운영용 MongoDB 저장소
//! - [`InMemoryUserRepository`](memory_user_repo::InMemoryUserRepository): 개발/테스트용

pub mod memory_user_repo;
pub mod user_repo;

pub use memory_user_repo::InMemoryUserRepository;
pub use user_repo::{MongoUserRepository, UserStore};
