//! # OAuth 로그인 서비스
//!
//! Google, Facebook OAuth 2.0 Authorization Code 플로우를 처리합니다.
//!
//! ```text
//! GET /auth/{provider}              → authorization_url(provider, state) 로 리다이렉트
//! GET /auth/{provider}/confessions  → authenticate(provider, code)
//!                                      ├─ 코드 → 액세스 토큰
//!                                      ├─ 액세스 토큰 → 프로바이더 사용자 ID
//!                                      └─ find_or_create_by_provider
//! ```
//!
//! state 값의 발급과 검증은 핸들러가 서명 쿠키로 처리합니다.
//! 클라이언트 ID/시크릿이 없는 프로바이더는 비활성화되며 요청 시 에러를 반환합니다.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::{OAuthProvider, OAuthProviderSettings},
    domain::entities::users::User,
    errors::AppError,
    repositories::users::UserStore,
    services::auth::oauth_client::OAuthClient,
};

pub struct OAuthService {
    providers: HashMap<OAuthProvider, OAuthProviderSettings>,
    client: Arc<dyn OAuthClient>,
    users: Arc<dyn UserStore>,
}

impl OAuthService {
    pub fn new(
        providers: Vec<OAuthProviderSettings>,
        client: Arc<dyn OAuthClient>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|settings| (settings.provider, settings))
            .collect();

        Self {
            providers,
            client,
            users,
        }
    }

    pub fn is_configured(&self, provider: OAuthProvider) -> bool {
        self.providers.contains_key(&provider)
    }

    /// 활성화된 프로바이더 (화면 표시 순서 고정)
    pub fn enabled_providers(&self) -> Vec<OAuthProvider> {
        [OAuthProvider::Google, OAuthProvider::Facebook]
            .into_iter()
            .filter(|provider| self.is_configured(*provider))
            .collect()
    }

    fn settings(&self, provider: OAuthProvider) -> Result<&OAuthProviderSettings, AppError> {
        self.providers.get(&provider).ok_or_else(|| {
            AppError::ExternalServiceError(format!(
                "{} OAuth가 설정되지 않았습니다",
                provider.display_name()
            ))
        })
    }

    /// CSRF 방지용 state 값
    pub fn generate_state() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// 프로바이더 동의 화면 URL
    pub fn authorization_url(&self, provider: OAuthProvider, state: &str) -> Result<String, AppError> {
        let settings = self.settings(provider)?;

        let mut params = vec![
            ("client_id", settings.client_id.as_str()),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("response_type", "code"),
            ("state", state),
        ];
        if let Some(scope) = settings.scope.as_deref() {
            params.push(("scope", scope));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", settings.auth_uri, query_string))
    }

    /// 인가 코드로 사용자를 확인하고 없으면 생성합니다.
    pub async fn authenticate(&self, provider: OAuthProvider, code: &str) -> Result<User, AppError> {
        let settings = self.settings(provider)?;

        let token = self.client.exchange_code(settings, code).await?;
        let identity = self.client.fetch_identity(settings, &token.access_token).await?;

        let user = self
            .users
            .find_or_create_by_provider(identity.provider, &identity.id)
            .await?;

        log::info!(
            "{} 사용자 로그인: {}",
            provider.display_name(),
            user.id_string().unwrap_or_default()
        );

        Ok(user)
    }
}
