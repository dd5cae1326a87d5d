//! # 애플리케이션 상태
//!
//! 핸들러와 미들웨어가 공유하는 서비스 묶음입니다.
//! `web::Data<AppState>`로 등록되며 전역 가변 상태는 두지 않습니다.
//!
//! ```text
//! AppState
//!  ├─ users     UserService     ── Arc<dyn UserStore>
//!  ├─ sessions  SessionService  ── Arc<dyn SessionStore>
//!  ├─ oauth     OAuthService    ── Arc<dyn OAuthClient> + Arc<dyn UserStore>
//!  └─ cookies   SessionCookies  (서명 키)
//! ```

use std::sync::Arc;

use crate::{
    config::{OAuthConfig, OAuthProviderSettings, PasswordConfig, SessionConfig},
    errors::{AppError, AppResult},
    middlewares::SessionCookies,
    repositories::{sessions::SessionStore, users::UserStore},
    services::{
        auth::{OAuthClient, OAuthService, SessionService},
        users::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub sessions: Arc<SessionService>,
    pub oauth: Arc<OAuthService>,
    pub cookies: SessionCookies,
}

impl AppState {
    pub fn new(
        users: Arc<UserService>,
        sessions: Arc<SessionService>,
        oauth: Arc<OAuthService>,
        cookies: SessionCookies,
    ) -> Self {
        Self {
            users,
            sessions,
            oauth,
            cookies,
        }
    }

    /// 환경 설정으로 서비스를 조립합니다.
    ///
    /// 프로덕션에서 `SESSION_SECRET`이 없으면 실패합니다.
    pub fn from_config(
        user_store: Arc<dyn UserStore>,
        session_store: Arc<dyn SessionStore>,
        oauth_client: Arc<dyn OAuthClient>,
    ) -> AppResult<Self> {
        let ttl_seconds = SessionConfig::ttl_seconds();
        let secret = SessionConfig::secret().map_err(AppError::InternalError)?;

        Ok(Self::assemble(
            user_store,
            session_store,
            oauth_client,
            OAuthConfig::configured_providers(),
            PasswordConfig::bcrypt_cost(),
            SessionCookies::new(
                &secret,
                SessionConfig::cookie_secure(),
                ttl_seconds,
                OAuthConfig::state_timeout_minutes(),
            ),
            ttl_seconds,
        ))
    }

    fn assemble(
        user_store: Arc<dyn UserStore>,
        session_store: Arc<dyn SessionStore>,
        oauth_client: Arc<dyn OAuthClient>,
        providers: Vec<OAuthProviderSettings>,
        bcrypt_cost: u32,
        cookies: SessionCookies,
        ttl_seconds: u64,
    ) -> Self {
        let users = Arc::new(UserService::new(Arc::clone(&user_store), bcrypt_cost));
        let sessions = Arc::new(SessionService::new(session_store, ttl_seconds));
        let oauth = Arc::new(OAuthService::new(providers, oauth_client, user_store));

        Self::new(users, sessions, oauth, cookies)
    }

    /// 메모리 저장소와 테스트용 설정으로 만든 상태
    #[cfg(test)]
    pub(crate) fn for_tests(
        user_store: Arc<dyn UserStore>,
        session_store: Arc<dyn SessionStore>,
        oauth_client: Arc<dyn OAuthClient>,
        providers: Vec<OAuthProviderSettings>,
    ) -> Self {
        Self::assemble(
            user_store,
            session_store,
            oauth_client,
            providers,
            4,
            SessionCookies::new("test-session-secret", false, 3600, 10),
            3600,
        )
    }
}
