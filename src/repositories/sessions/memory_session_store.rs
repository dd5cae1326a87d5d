//! 프로세스 내 메모리 세션 저장소 (`SESSION_STORE=memory`, 테스트)
//!
//! 만료된 레코드는 조회 시점과 새 레코드 저장 시점에 제거됩니다.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::models::session::SessionRecord;
use crate::errors::AppError;
use crate::repositories::sessions::session_repository::SessionStore;

#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, (SessionRecord, i64)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> AppError {
    AppError::SessionStoreError("메모리 세션 저장소 잠금 실패".to_string())
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, key: &str, record: &SessionRecord, ttl_seconds: u64) -> Result<(), AppError> {
        let now = Utc::now().timestamp();
        let evict_at = now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX));
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;

        // 다시 조회되지 않는 세션이 쌓이지 않도록 저장할 때 함께 정리
        entries.retain(|_, (_, entry_evict_at)| *entry_evict_at > now);
        entries.insert(key.to_string(), (record.clone(), evict_at));
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, AppError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;

        match entries.get(key) {
            Some((_, evict_at)) if *evict_at <= Utc::now().timestamp() => {
                entries.remove(key);
                Ok(None)
            }
            Some((record, _)) => Ok(Some(record.clone())),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
