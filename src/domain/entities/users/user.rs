//! 사용자 엔티티
//!
//! `users` 컬렉션에 저장되는 유일한 영속 엔티티입니다.
//! 필드명은 MongoDB 문서에서 camelCase(`googleId`, `facebookId`)로 저장됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::OAuthProvider;

/// 사용자 문서
///
/// 인증 수단(`password`, `googleId`, `facebookId`) 중 최소 하나를 가집니다.
/// 이 불변식은 [`User::new_local`]과 [`User::new_oauth`] 생성자로만 보장되므로
/// 새 사용자는 반드시 두 생성자 중 하나로 만들어야 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// 로컬 계정의 로그인 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// bcrypt 해시 (salt 포함). 로컬 계정에만 존재합니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,

    /// 사용자당 하나, 마지막 제출이 이전 값을 덮어씁니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confession: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl User {
    pub fn new_local(username: String, password_hash: String) -> Self {
        Self {
            id: None,
            username: Some(username),
            email: None,
            password: Some(password_hash),
            google_id: None,
            facebook_id: None,
            confession: None,
            created_at: Some(DateTime::now()),
        }
    }

    pub fn new_oauth(provider: OAuthProvider, provider_user_id: String) -> Self {
        let mut user = Self {
            id: None,
            username: None,
            email: None,
            password: None,
            google_id: None,
            facebook_id: None,
            confession: None,
            created_at: Some(DateTime::now()),
        };

        match provider {
            OAuthProvider::Google => user.google_id = Some(provider_user_id),
            OAuthProvider::Facebook => user.facebook_id = Some(provider_user_id),
        }

        user
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn provider_id(&self, provider: OAuthProvider) -> Option<&str> {
        match provider {
            OAuthProvider::Google => self.google_id.as_deref(),
            OAuthProvider::Facebook => self.facebook_id.as_deref(),
        }
    }

    /// 인증 수단이 하나 이상 있는지
    pub fn has_credential(&self) -> bool {
        self.password.is_some() || self.google_id.is_some() || self.facebook_id.is_some()
    }

    /// 화면에 표시할 이름
    pub fn display_name(&self) -> String {
        if let Some(username) = &self.username {
            return username.clone();
        }
        if self.google_id.is_some() {
            return "Google user".to_string();
        }
        if self.facebook_id.is_some() {
            return "Facebook user".to_string();
        }
        "Anonymous".to_string()
    }
}
