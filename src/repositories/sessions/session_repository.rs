//! 세션 저장소
//!
//! 키는 세션 토큰의 SHA-256 해시(`session:{hex}`)이며 값은 [`SessionRecord`]입니다.
//! TTL이 지나면 저장소가 레코드를 자동으로 제거합니다.

use std::sync::Arc;

use async_trait::async_trait;

use crate::caching::redis::RedisClient;
use crate::domain::models::session::SessionRecord;
use crate::errors::AppError;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, key: &str, record: &SessionRecord, ttl_seconds: u64) -> Result<(), AppError>;

    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, AppError>;

    /// 존재하지 않는 키를 지워도 에러가 아닙니다.
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Redis 기반 세션 저장소
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
}

impl RedisSessionStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, key: &str, record: &SessionRecord, ttl_seconds: u64) -> Result<(), AppError> {
        // Redis SETEX는 0초 TTL을 거부합니다
        let safe_ttl = ttl_seconds.max(1);

        self.redis
            .set_with_expiry(key, record, safe_ttl)
            .await
            .map_err(|e| AppError::SessionStoreError(e.to_string()))
    }

    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, AppError> {
        self.redis
            .get::<SessionRecord>(key)
            .await
            .map_err(|e| AppError::SessionStoreError(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.redis
            .del(key)
            .await
            .map_err(|e| AppError::SessionStoreError(e.to_string()))
    }
}
