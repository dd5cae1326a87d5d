//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다.
//! [`UserStore`] trait이 저장소 계약을 정의하고, [`MongoUserRepository`]가
//! MongoDB `users` 컬렉션으로 구현합니다.
//!
//! ## 데이터 무결성
//!
//! - `username`, `googleId`, `facebookId` 각각에 sparse unique 인덱스
//! - OAuth find-or-create는 단일 `findOneAndUpdate` + upsert로 수행
//! - 고백 덮어쓰기는 단일 문서 `$set`

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    config::OAuthProvider,
    db::Database,
    domain::entities::users::User,
    errors::AppError,
};

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 저장소 계약
///
/// 모든 메서드는 `Result<T, AppError>`를 반환하며 저장소 장애는
/// `AppError::DatabaseError`로 보고합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ObjectId 16진수 문자열로 조회. 형식이 잘못된 ID는 `Ok(None)`.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// 로컬 사용자 저장. 사용자명 중복이면 `DuplicateOrInvalidRegistration`.
    async fn insert_local(&self, user: User) -> Result<User, AppError>;

    /// 프로바이더 ID로 사용자를 찾고, 없으면 원자적으로 생성합니다.
    ///
    /// 같은 ID로 동시에 호출되어도 사용자는 정확히 하나만 만들어집니다.
    async fn find_or_create_by_provider(
        &self,
        provider: OAuthProvider,
        provider_user_id: &str,
    ) -> Result<User, AppError>;

    /// 고백을 덮어씁니다. 사용자가 없으면 `Ok(None)`.
    async fn set_confession(&self, id: &str, confession: &str) -> Result<Option<User>, AppError>;

    /// 고백이 있는 모든 사용자
    async fn find_with_confession(&self) -> Result<Vec<User>, AppError>;

    /// 저장소 초기화 (인덱스 생성 등)
    async fn init(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// MongoDB 기반 사용자 리포지토리
///
/// - **컬렉션명**: `users`
/// - **인덱스**: username, googleId, facebookId (모두 unique + sparse)
pub struct MongoUserRepository {
    db: Database,
}

impl MongoUserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(Self::COLLECTION)
    }

    /// 사용자 컬렉션 인덱스를 생성합니다.
    ///
    /// 기존 데이터에 중복 값이 있으면 unique 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = ["username", "googleId", "facebookId"].map(|field| {
            IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .sparse(true)
                        .name(format!("{}_unique", field))
                        .build(),
                )
                .build()
        });

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert_local(&self, mut user: User) -> Result<User, AppError> {
        let username = user.username.clone().unwrap_or_default();

        if self.find_by_username(&username).await?.is_some() {
            return Err(AppError::DuplicateOrInvalidRegistration(format!(
                "이미 사용 중인 사용자명입니다: {}",
                username
            )));
        }

        let result = self.collection().insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::DuplicateOrInvalidRegistration(format!(
                    "이미 사용 중인 사용자명입니다: {}",
                    username
                ))
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    async fn find_or_create_by_provider(
        &self,
        provider: OAuthProvider,
        provider_user_id: &str,
    ) -> Result<User, AppError> {
        let field = provider.id_field();
        let filter = doc! { field: provider_user_id };
        let update = doc! {
            "$setOnInsert": {
                field: provider_user_id,
                "createdAt": DateTime::now(),
            }
        };

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let upserted = self
            .collection()
            .find_one_and_update(filter.clone(), update)
            .with_options(options)
            .await;

        match upserted {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::DatabaseError(format!(
                "{} upsert가 문서를 반환하지 않았습니다",
                field
            ))),
            // 동시 upsert 경합에서 진 쪽은 이긴 쪽이 만든 문서를 읽습니다
            Err(e) if is_duplicate_key(&e) => {
                log::debug!("{} upsert 경합 발생, 기존 문서 조회: {}", field, provider_user_id);
                self.collection()
                    .find_one(filter)
                    .await
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?
                    .ok_or_else(|| {
                        AppError::DatabaseError(format!("{} 중복 키 이후 문서를 찾을 수 없습니다", field))
                    })
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn set_confession(&self, id: &str, confession: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": { "confession": confession } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_with_confession(&self) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection()
            .find(doc! { "confession": { "$exists": true, "$ne": null } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn init(&self) -> Result<(), AppError> {
        self.create_indexes().await
    }
}
