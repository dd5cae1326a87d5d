//! OAuth 프로바이더 응답 DTO

use serde::Deserialize;

/// 토큰 엔드포인트 응답 (Google, Facebook 공통 필드)
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Google `oauth2/v3/userinfo` 응답. `profile` 스코프만 요청하므로 이메일은 없을 수 있습니다.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// Facebook Graph `/me?fields=id` 응답
#[derive(Debug, Deserialize)]
pub struct FacebookProfile {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
}
