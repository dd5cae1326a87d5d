//! 인증 및 세션 서비스 모듈
//!
//! 서버 측 세션과 OAuth 2.0 소셜 로그인을 담당합니다.
//!
//! # Features
//!
//! - 불투명 세션 토큰 발급, 조회, 폐기
//! - Google / Facebook OAuth 2.0 로그인
//! - 프로바이더 ID 기준 원자적 find-or-create
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{OAuthService, SessionService};
//!
//! let user = state.oauth.authenticate(OAuthProvider::Google, &code).await?;
//! let token = state.sessions.establish(&user, None).await?;
//! ```

pub mod oauth_client;
pub mod oauth_service;
pub mod session_service;

pub use oauth_client::{HttpOAuthClient, OAuthClient};
pub use oauth_service::OAuthService;
pub use session_service::SessionService;
