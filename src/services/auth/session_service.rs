//! # 세션 서비스
//!
//! 브라우저가 가진 불투명 토큰과 서버 측 사용자 ID를 연결합니다.
//!
//! - 토큰은 UUID v4 두 개를 이어 붙인 64자 16진수 문자열
//! - 저장소 키는 `session:{sha256(token)}` (토큰 원문은 저장하지 않음)
//! - 로그인 시 이전 토큰을 폐기하고 새 토큰을 발급 (세션 고정 방지)

use std::sync::Arc;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    domain::{entities::users::User, models::session::SessionRecord},
    errors::AppError,
    repositories::sessions::SessionStore,
};

pub struct SessionService {
    store: Arc<dyn SessionStore>,
    ttl_seconds: u64,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// 사용자에게 새 세션을 발급하고 토큰을 반환합니다.
    ///
    /// `previous_token`이 있으면 그 세션은 폐기됩니다. 폐기 실패는 로그만 남깁니다.
    pub async fn establish(&self, user: &User, previous_token: Option<&str>) -> Result<String, AppError> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let token = generate_token();
        let record = SessionRecord::new(user_id, self.ttl_seconds);

        self.store
            .save(&storage_key(&token), &record, self.ttl_seconds)
            .await?;

        if let Some(previous) = previous_token {
            if let Err(e) = self.store.remove(&storage_key(previous)).await {
                log::warn!("이전 세션 폐기 실패: {}", e);
            }
        }

        log::debug!("세션 발급: user={}", record.user_id);

        Ok(token)
    }

    /// 유효한 세션 레코드. 없거나 만료되었으면 `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<SessionRecord>, AppError> {
        let key = storage_key(token);

        match self.store.load(&key).await? {
            Some(record) if record.is_expired() => {
                self.store.remove(&key).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub async fn invalidate(&self, token: &str) -> Result<(), AppError> {
        self.store.remove(&storage_key(token)).await
    }
}

fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn storage_key(token: &str) -> String {
    format!("session:{:x}", Sha256::digest(token.as_bytes()))
}
