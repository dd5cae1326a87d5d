//! # Domain Models Module
//!
//! 영속되지 않는 값 객체를 정의합니다.
//!
//! - [`auth`] - 요청에 바인딩된 현재 사용자 (`CurrentUser`, `OptionalUser`)
//! - [`session`] - 세션 저장소에 기록되는 `SessionRecord`
//! - [`oauth`] - OAuth 핸드셰이크로 확인된 외부 신원

pub mod auth;
pub mod session;
pub mod oauth;

pub use auth::*;
pub use session::*;
pub use oauth::*;
