//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//! 설정 구조체는 상태를 갖지 않으며, 호출 시점에 환경 변수를 읽습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 데이터베이스, 비밀번호 해싱, 실행 환경
//! - [`auth_config`] - 세션, OAuth 프로바이더
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{ServerConfig, SessionConfig};
//!
//! let port = ServerConfig::port();          // PORT, 기본값 3000
//! let ttl = SessionConfig::ttl_seconds();    // SESSION_TTL_SECONDS, 기본값 86400
//! ```
//!
//! 필수 비밀값(`SESSION_SECRET`, OAuth 클라이언트 시크릿)은 환경 변수로만 제공합니다.
//! 로컬 개발용 기본값은 프로덕션에서 안전하지 않습니다.

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
