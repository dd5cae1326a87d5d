//! 프로세스 내 메모리 사용자 저장소
//!
//! `STORAGE_BACKEND=memory`로 실행하거나 테스트에서 MongoDB 없이 사용합니다.
//! 모든 연산은 하나의 뮤텍스 안에서 수행되므로 find-or-create가 원자적입니다.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::{
    config::OAuthProvider,
    domain::entities::users::User,
    errors::AppError,
    repositories::users::user_repo::UserStore,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, AppError> {
        self.users
            .lock()
            .map_err(|_| AppError::DatabaseError("메모리 저장소 잠금 실패".to_string()))
    }

    pub fn count(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let users = self.lock()?;
        Ok(users.iter().find(|u| u.id == Some(object_id)).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.lock()?;
        Ok(users
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn insert_local(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.lock()?;

        if let Some(username) = user.username.as_deref() {
            if users.iter().any(|u| u.username.as_deref() == Some(username)) {
                return Err(AppError::DuplicateOrInvalidRegistration(format!(
                    "이미 사용 중인 사용자명입니다: {}",
                    username
                )));
            }
        }

        user.id = Some(ObjectId::new());
        if user.created_at.is_none() {
            user.created_at = Some(DateTime::now());
        }
        users.push(user.clone());

        Ok(user)
    }

    async fn find_or_create_by_provider(
        &self,
        provider: OAuthProvider,
        provider_user_id: &str,
    ) -> Result<User, AppError> {
        let mut users = self.lock()?;

        if let Some(existing) = users
            .iter()
            .find(|u| u.provider_id(provider) == Some(provider_user_id))
        {
            return Ok(existing.clone());
        }

        let mut user = User::new_oauth(provider, provider_user_id.to_string());
        user.id = Some(ObjectId::new());
        users.push(user.clone());

        Ok(user)
    }

    async fn set_confession(&self, id: &str, confession: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let mut users = self.lock()?;
        Ok(users
            .iter_mut()
            .find(|u| u.id == Some(object_id))
            .map(|user| {
                user.confession = Some(confession.to_string());
                user.clone()
            }))
    }

    async fn find_with_confession(&self) -> Result<Vec<User>, AppError> {
        let users = self.lock()?;
        Ok(users
            .iter()
            .filter(|u| u.confession.is_some())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_insert_local_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();

        let first = repo
            .insert_local(User::new_local("alice".to_string(), "h1".to_string()))
            .await
            .unwrap();
        assert!(first.id.is_some());

        let second = repo
            .insert_local(User::new_local("alice".to_string(), "h2".to_string()))
            .await;
        assert!(matches!(second, Err(AppError::DuplicateOrInvalidRegistration(_))));
        assert_eq!(repo.count(), 1);
    }

    #[actix_web::test]
    async fn test_find_or_create_is_idempotent() {
        let repo = InMemoryUserRepository::new();

        let first = repo
            .find_or_create_by_provider(OAuthProvider::Google, "g-1")
            .await
            .unwrap();
        let second = repo
            .find_or_create_by_provider(OAuthProvider::Google, "g-1")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.count(), 1);

        // 같은 ID라도 다른 프로바이더는 별개의 사용자
        repo.find_or_create_by_provider(OAuthProvider::Facebook, "g-1")
            .await
            .unwrap();
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_concurrent_find_or_create_creates_one_user() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    actix_web::rt::System::new().block_on(async move {
                        repo.find_or_create_by_provider(OAuthProvider::Facebook, "fb-42")
                            .await
                            .unwrap()
                            .id
                    })
                })
            })
            .collect();

        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(repo.count(), 1);
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[actix_web::test]
    async fn test_set_confession_overwrites_and_lists() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert_local(User::new_local("bob".to_string(), "h".to_string()))
            .await
            .unwrap();
        repo.insert_local(User::new_local("carol".to_string(), "h".to_string()))
            .await
            .unwrap();
        let id = user.id_string().unwrap();

        repo.set_confession(&id, "first").await.unwrap();
        let updated = repo.set_confession(&id, "second").await.unwrap().unwrap();
        assert_eq!(updated.confession.as_deref(), Some("second"));

        let with_confession = repo.find_with_confession().await.unwrap();
        assert_eq!(with_confession.len(), 1);
        assert_eq!(with_confession[0].confession.as_deref(), Some("second"));
    }

    #[actix_web::test]
    async fn test_malformed_id_is_not_found() {
        let repo = InMemoryUserRepository::new();

        assert!(repo.find_by_id("not-an-object-id").await.unwrap().is_none());
        assert!(repo.set_confession("nope", "x").await.unwrap().is_none());
    }
}
