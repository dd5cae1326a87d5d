//! 요청 DTO
//!
//! 모든 필드는 `#[serde(default)]`로 선언되어 누락된 필드가 역직렬화 실패(400)가 아닌
//! 검증 실패로 처리됩니다. 검증 실패는 핸들러에서 리다이렉트로 변환됩니다.

pub mod auth_request;
pub mod confession_request;

pub use auth_request::*;
pub use confession_request::*;
