//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서와 매핑되는 영속 엔티티 (User)
//! ├── dto       - 폼 요청 / 화면 출력용 데이터 전송 객체
//! └── models    - 세션, 현재 사용자, OAuth 프로필 등 값 객체
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::users::User;
pub use models::*;
