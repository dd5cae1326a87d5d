//! 사용자 관리 서비스 모듈
//!
//! 로컬 계정 등록, 비밀번호 인증, 고백 저장/조회를 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let service = UserService::new(user_store, PasswordConfig::bcrypt_cost());
//! let user = service.verify_password("alice", "secret").await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
