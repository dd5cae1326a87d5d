//! # Authentication Configuration Module
//!
//! 세션, OAuth 프로바이더 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 사용자명/패스워드
//! 2. **Google OAuth 2.0**
//! 3. **Facebook OAuth 2.0**
//!
//! 클라이언트 ID/시크릿이 설정되지 않은 프로바이더는 비활성화됩니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export SESSION_SECRET="long-random-secret"
//! export SESSION_TTL_SECONDS="86400"
//! export PUBLIC_BASE_URL="https://confessions.example.com"
//!
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//!
//! export FACEBOOK_APP_ID="your-facebook-app-id"
//! export FACEBOOK_APP_SECRET="your-facebook-app-secret"
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::config::data_config::Environment;

/// 세션 저장소 백엔드
#[derive(Debug, Clone, PartialEq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

pub struct SessionConfig;

impl SessionConfig {
    pub const DEFAULT_TTL_SECONDS: u64 = 86_400;
    /// 세션 최대 수명 (1년)
    pub const MAX_TTL_SECONDS: u64 = 365 * 86_400;

    /// 쿠키 서명 비밀값. 프로덕션에서 `SESSION_SECRET`이 없으면 에러입니다.
    pub fn secret() -> Result<String, String> {
        Self::secret_for(&Environment::current(), non_empty_var("SESSION_SECRET"))
    }

    pub fn secret_for(environment: &Environment, configured: Option<String>) -> Result<String, String> {
        match configured {
            Some(secret) => Ok(secret),
            None if environment.is_production() => {
                Err("SESSION_SECRET must be set in production".to_string())
            }
            None => {
                log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
                Ok("confessions-session-secret".to_string())
            }
        }
    }

    pub fn ttl_seconds() -> u64 {
        Self::parse_ttl_seconds(env::var("SESSION_TTL_SECONDS").ok().as_deref())
    }

    /// 0이나 잘못된 값은 기본값, 상한을 넘으면 `MAX_TTL_SECONDS`
    pub fn parse_ttl_seconds(raw: Option<&str>) -> u64 {
        raw.and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(Self::DEFAULT_TTL_SECONDS)
            .min(Self::MAX_TTL_SECONDS)
    }

    /// 프로덕션에서는 기본적으로 `Secure` 쿠키를 사용합니다.
    pub fn cookie_secure() -> bool {
        match env::var("SESSION_COOKIE_SECURE") {
            Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => Environment::current().is_production(),
        }
    }

    pub fn backend() -> SessionBackend {
        match env::var("SESSION_STORE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" => SessionBackend::Memory,
            _ => SessionBackend::Redis,
        }
    }
}

pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth 콜백 URL을 만들 때 사용하는 공개 주소
    pub fn public_base_url() -> String {
        env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub const DEFAULT_STATE_TIMEOUT_MINUTES: i64 = 10;
    pub const MAX_STATE_TIMEOUT_MINUTES: i64 = 24 * 60;

    /// state 쿠키 유효 시간
    pub fn state_timeout_minutes() -> i64 {
        Self::parse_state_timeout_minutes(env::var("OAUTH_STATE_TIMEOUT_MINUTES").ok().as_deref())
    }

    /// 1분 ~ 24시간 범위로 제한
    pub fn parse_state_timeout_minutes(raw: Option<&str>) -> i64 {
        raw.and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(Self::DEFAULT_STATE_TIMEOUT_MINUTES)
            .clamp(1, Self::MAX_STATE_TIMEOUT_MINUTES)
    }

    /// 설정된 모든 프로바이더
    pub fn configured_providers() -> Vec<OAuthProviderSettings> {
        let base_url = Self::public_base_url();
        [
            GoogleOAuthConfig::settings(&base_url),
            FacebookOAuthConfig::settings(&base_url),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> Option<String> {
        non_empty_var("GOOGLE_CLIENT_ID")
    }

    pub fn client_secret() -> Option<String> {
        non_empty_var("GOOGLE_CLIENT_SECRET")
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/userinfo".to_string())
    }

    pub fn settings(base_url: &str) -> Option<OAuthProviderSettings> {
        Some(OAuthProviderSettings {
            provider: OAuthProvider::Google,
            client_id: Self::client_id()?,
            client_secret: Self::client_secret()?,
            redirect_uri: format!("{}{}", base_url, OAuthProvider::Google.callback_path()),
            auth_uri: Self::auth_uri(),
            token_uri: Self::token_uri(),
            profile_uri: Self::userinfo_uri(),
            scope: Some("profile".to_string()),
        })
    }
}

pub struct FacebookOAuthConfig;

impl FacebookOAuthConfig {
    pub fn app_id() -> Option<String> {
        non_empty_var("FACEBOOK_APP_ID")
    }

    pub fn app_secret() -> Option<String> {
        non_empty_var("FACEBOOK_APP_SECRET")
    }

    pub fn graph_version() -> String {
        env::var("FACEBOOK_GRAPH_VERSION").unwrap_or_else(|_| "v3.2".to_string())
    }

    pub fn settings(base_url: &str) -> Option<OAuthProviderSettings> {
        let version = Self::graph_version();
        Some(OAuthProviderSettings {
            provider: OAuthProvider::Facebook,
            client_id: Self::app_id()?,
            client_secret: Self::app_secret()?,
            redirect_uri: format!("{}{}", base_url, OAuthProvider::Facebook.callback_path()),
            auth_uri: format!("https://www.facebook.com/{}/dialog/oauth", version),
            token_uri: format!("https://graph.facebook.com/{}/oauth/access_token", version),
            profile_uri: format!("https://graph.facebook.com/{}/me?fields=id", version),
            scope: None,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// OAuth 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthProvider {
    Google,
    Facebook,
}

impl OAuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "facebook" => Ok(OAuthProvider::Facebook),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Facebook => "facebook",
        }
    }

    /// 사용자 문서에서 프로바이더 ID를 저장하는 필드명
    pub fn id_field(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "googleId",
            OAuthProvider::Facebook => "facebookId",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Facebook => "Facebook",
        }
    }

    pub fn login_path(&self) -> String {
        format!("/auth/{}", self.as_str())
    }

    pub fn callback_path(&self) -> String {
        format!("/auth/{}/confessions", self.as_str())
    }
}

/// 한 프로바이더의 OAuth 엔드포인트와 클라이언트 자격 증명
#[derive(Debug, Clone)]
pub struct OAuthProviderSettings {
    pub provider: OAuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub profile_uri: String,
    pub scope: Option<String>,
}
