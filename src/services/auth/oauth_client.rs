//! OAuth 프로바이더 HTTP 통신
//!
//! 인가 코드 교환과 프로필 조회만 담당합니다. 사용자 저장은 [`OAuthService`]가 합니다.
//!
//! [`OAuthService`]: crate::services::auth::OAuthService

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    config::{OAuthProvider, OAuthProviderSettings},
    domain::{
        dto::users::response::{FacebookProfile, GoogleUserInfo, OAuthTokenResponse},
        models::oauth::ProviderIdentity,
    },
    errors::{AppError, AppResult, ErrorContext},
};

/// OAuth 호출 제한 시간
const OAUTH_HTTP_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// 인가 코드를 액세스 토큰으로 교환
    async fn exchange_code(
        &self,
        settings: &OAuthProviderSettings,
        code: &str,
    ) -> Result<OAuthTokenResponse, AppError>;

    /// 액세스 토큰으로 프로바이더 사용자 ID 조회
    async fn fetch_identity(
        &self,
        settings: &OAuthProviderSettings,
        access_token: &str,
    ) -> Result<ProviderIdentity, AppError>;
}

/// `reqwest` 기반 운영용 클라이언트
#[derive(Clone)]
pub struct HttpOAuthClient {
    client: reqwest::Client,
}

impl HttpOAuthClient {
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(OAUTH_HTTP_TIMEOUT_SECS))
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OAuthClient for HttpOAuthClient {
    async fn exchange_code(
        &self,
        settings: &OAuthProviderSettings,
        code: &str,
    ) -> Result<OAuthTokenResponse, AppError> {
        let provider = settings.provider.display_name();
        let params = [
            ("code", code),
            ("client_id", settings.client_id.as_str()),
            ("client_secret", settings.client_secret.as_str()),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        // Graph API는 GET 쿼리, Google은 form POST
        let request = match settings.provider {
            OAuthProvider::Google => self.client.post(&settings.token_uri).form(&params),
            OAuthProvider::Facebook => self.client.get(&settings.token_uri).query(&params),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", provider, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패 ({}): {}",
                provider, status, error_text
            )));
        }

        response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", provider, e)))
    }

    async fn fetch_identity(
        &self,
        settings: &OAuthProviderSettings,
        access_token: &str,
    ) -> Result<ProviderIdentity, AppError> {
        let provider = settings.provider.display_name();

        let response = self
            .client
            .get(&settings.profile_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 프로필 요청 실패: {}", provider, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 프로필 조회 실패 ({}): {}",
                provider, status, error_text
            )));
        }

        let parse_error =
            |e: reqwest::Error| AppError::ExternalServiceError(format!("{} 프로필 파싱 실패: {}", provider, e));

        let id = match settings.provider {
            OAuthProvider::Google => response.json::<GoogleUserInfo>().await.map_err(parse_error)?.sub,
            OAuthProvider::Facebook => response.json::<FacebookProfile>().await.map_err(parse_error)?.id,
        };

        if id.trim().is_empty() {
            return Err(AppError::ExternalServiceError(format!(
                "{} 프로필에 사용자 ID가 없습니다",
                provider
            )));
        }

        Ok(ProviderIdentity {
            provider: settings.provider,
            id,
        })
    }
}

/// 네트워크 없이 고정된 프로바이더 ID를 돌려주는 테스트용 클라이언트
///
/// 인가 코드가 `"rejected"`이면 토큰 교환에 실패합니다.
#[cfg(test)]
pub(crate) struct StubOAuthClient {
    pub provider_user_id: String,
}

#[cfg(test)]
impl StubOAuthClient {
    pub const REJECTED_CODE: &'static str = "rejected";

    pub fn returning(provider_user_id: &str) -> Self {
        Self {
            provider_user_id: provider_user_id.to_string(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl OAuthClient for StubOAuthClient {
    async fn exchange_code(
        &self,
        settings: &OAuthProviderSettings,
        code: &str,
    ) -> Result<OAuthTokenResponse, AppError> {
        if code == Self::REJECTED_CODE {
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패",
                settings.provider.display_name()
            )));
        }

        Ok(OAuthTokenResponse {
            access_token: format!("access-{}", code),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3600),
        })
    }

    async fn fetch_identity(
        &self,
        settings: &OAuthProviderSettings,
        _access_token: &str,
    ) -> Result<ProviderIdentity, AppError> {
        Ok(ProviderIdentity {
            provider: settings.provider,
            id: self.provider_user_id.clone(),
        })
    }
}
