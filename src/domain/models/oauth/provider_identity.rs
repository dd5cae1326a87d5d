use crate::config::OAuthProvider;

/// OAuth 핸드셰이크가 끝난 뒤 프로바이더가 알려준 사용자 식별자
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub provider: OAuthProvider,
    pub id: String,
}
