//! 응답 DTO
//!
//! 외부 OAuth 응답 파싱용 구조체와 화면 출력용 구조체를 포함합니다.

pub mod oauth_response;
pub mod confession_response;

pub use oauth_response::*;
pub use confession_response::*;
