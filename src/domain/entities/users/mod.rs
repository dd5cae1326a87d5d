//! Users Entity Module
//!
//! 로컬 인증과 OAuth 인증을 모두 지원하는 User 엔티티를 포함합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let local = User::new_local("alice".to_string(), password_hash);
//! let google = User::new_oauth(OAuthProvider::Google, "google_user_id_123".to_string());
//! ```

pub mod user;

pub use user::User;
