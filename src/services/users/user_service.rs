//! # 사용자 서비스
//!
//! 로컬 계정 등록과 비밀번호 인증, 고백 저장과 피드 조회를 담당합니다.
//!
//! ## 보안
//!
//! - **bcrypt 해싱**: 솔트는 해시에 포함되며 cost는 `PasswordConfig`가 환경별로 결정
//! - **블로킹 풀**: bcrypt 해싱/검증은 `web::block`으로 워커 스레드 밖에서 실행
//! - **실패 사유 비노출**: 인증 실패는 모두 `InvalidCredentials`로 합쳐져 로그에만 남음

use std::sync::Arc;

use actix_web::web;
use bcrypt::{hash, verify};
use validator::Validate;

use crate::{
    domain::{
        dto::users::{request::RegisterRequest, response::ConfessionEntry},
        entities::users::User,
    },
    errors::AppError,
    repositories::users::UserStore,
};

/// 사용자 관리 비즈니스 로직 서비스
///
/// ```rust,ignore
/// let user = state.users.register_local(form.into_inner()).await?;
/// let same = state.users.verify_password("alice", "secret").await?;
/// ```
pub struct UserService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub fn store(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }

    /// 새 로컬 계정 생성
    ///
    /// # Errors
    ///
    /// * `DuplicateOrInvalidRegistration` - 필드 누락 또는 사용자명 중복
    /// * `InternalError` - 해싱 실패
    /// * `DatabaseError` - 저장소 장애
    pub async fn register_local(&self, request: RegisterRequest) -> Result<User, AppError> {
        request
            .validate()
            .map_err(|e| AppError::DuplicateOrInvalidRegistration(e.to_string()))?;

        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::DuplicateOrInvalidRegistration(format!(
                "이미 사용 중인 사용자명입니다: {}",
                request.username
            )));
        }

        let start_time = std::time::Instant::now();
        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        // 사전 확인과 저장 사이의 경합은 unique 인덱스가 막습니다
        let user = self
            .users
            .insert_local(User::new_local(request.username, password_hash))
            .await?;

        log::info!("🆕 로컬 사용자 등록: {}", user.display_name());

        Ok(user)
    }

    /// 사용자명/비밀번호 검증
    ///
    /// 존재하지 않는 사용자, 비밀번호가 없는 OAuth 전용 계정,
    /// 비밀번호 불일치를 모두 `InvalidCredentials`로 보고합니다.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::InvalidCredentials(format!("존재하지 않는 사용자: {}", username))
            })?;

        let Some(stored_hash) = user.password.clone() else {
            return Err(AppError::InvalidCredentials(format!(
                "비밀번호가 없는 계정입니다: {}",
                username
            )));
        };

        let candidate = password.to_string();
        let matches = web::block(move || verify(candidate, &stored_hash))
            .await
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 작업 실패: {}", e)))?
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            return Err(AppError::InvalidCredentials(format!(
                "비밀번호 불일치: {}",
                username
            )));
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_id(id).await
    }

    /// 현재 사용자의 고백을 덮어씁니다. 내용과 길이는 검사하지 않습니다.
    pub async fn submit_confession(&self, user_id: &str, confession: &str) -> Result<User, AppError> {
        let updated = self
            .users
            .set_confession(user_id, confession)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))?;

        log::info!("📝 고백 저장: user={}", user_id);

        Ok(updated)
    }

    /// 고백이 있는 모든 사용자의 고백
    pub async fn list_confessions(&self) -> Result<Vec<ConfessionEntry>, AppError> {
        let users = self.users.find_with_confession().await?;

        Ok(users.iter().filter_map(ConfessionEntry::from_user).collect())
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    web::block(move || hash(password, cost))
        .await
        .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 작업 실패: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OAuthProvider;
    use crate::repositories::users::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()), 4)
    }

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_then_verify_password() {
        let service = service();

        let user = service.register_local(register("alice", "secret")).await.unwrap();
        assert!(user.id.is_some());
        assert_ne!(user.password.as_deref(), Some("secret"));

        let verified = service.verify_password("alice", "secret").await.unwrap();
        assert_eq!(verified.id, user.id);
    }

    #[actix_web::test]
    async fn test_duplicate_registration_keeps_first_password() {
        let service = service();

        service.register_local(register("alice", "first")).await.unwrap();
        let second = service.register_local(register("alice", "second")).await;

        assert!(matches!(second, Err(AppError::DuplicateOrInvalidRegistration(_))));
        assert!(service.verify_password("alice", "first").await.is_ok());
        assert!(service.verify_password("alice", "second").await.is_err());
    }

    #[actix_web::test]
    async fn test_register_rejects_missing_fields() {
        let service = service();

        let result = service.register_local(register("alice", "")).await;

        assert!(matches!(result, Err(AppError::DuplicateOrInvalidRegistration(_))));
    }

    #[actix_web::test]
    async fn test_verify_password_failures_are_invalid_credentials() {
        let service = service();
        service.register_local(register("alice", "secret")).await.unwrap();
        service
            .store()
            .find_or_create_by_provider(OAuthProvider::Google, "g-1")
            .await
            .unwrap();

        let wrong_password = service.verify_password("alice", "nope").await;
        let unknown_user = service.verify_password("bob", "secret").await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials(_))));
        assert!(matches!(unknown_user, Err(AppError::InvalidCredentials(_))));
    }

    #[actix_web::test]
    async fn test_last_confession_wins() {
        let service = service();
        let user = service.register_local(register("alice", "secret")).await.unwrap();
        let id = user.id_string().unwrap();

        service.submit_confession(&id, "A").await.unwrap();
        service.submit_confession(&id, "B").await.unwrap();

        let feed = service.list_confessions().await.unwrap();
        assert_eq!(feed, vec![ConfessionEntry { text: "B".to_string() }]);
    }

    #[actix_web::test]
    async fn test_submit_for_missing_user_is_not_found() {
        let service = service();

        let result = service
            .submit_confession("507f1f77bcf86cd799439011", "text")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
