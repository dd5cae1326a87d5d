//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 trait(`Arc<dyn ...>`)에만 의존하며 `AppState`를 통해 핸들러에 전달됩니다.
//!
//! # Features
//!
//! - 로컬 계정 등록과 비밀번호 인증
//! - 고백 저장과 피드 조회
//! - 서버 측 세션 관리
//! - OAuth 2.0 소셜 로그인 (Google, Facebook)

pub mod auth;
pub mod users;
