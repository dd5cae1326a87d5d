//! 세션 레코드
//!
//! 세션 저장소에는 토큰 원문이 아닌 SHA-256 해시 키로 저장됩니다.

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// 인증된 사용자의 ObjectId (16진수 문자열)
    pub user_id: String,
    /// 생성 시각 (Unix timestamp, 초)
    pub created_at: i64,
    /// 만료 시각 (Unix timestamp, 초)
    pub expires_at: i64,
}

impl SessionRecord {
    pub fn new(user_id: String, ttl_seconds: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id,
            created_at: now,
            expires_at: now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now().timestamp()
    }
}
