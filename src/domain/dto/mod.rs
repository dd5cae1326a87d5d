//! # Data Transfer Objects
//!
//! HTTP 경계에서 사용하는 요청/응답 객체입니다.
//! 폼 본문은 핸들러 로직에 도달하기 전에 명시적인 필드와 `validator` 규칙을 가진
//! DTO로 역직렬화됩니다.

pub mod users;

pub use users::*;
