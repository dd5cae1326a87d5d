//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용합니다.
//! 이 서비스는 서버 렌더링 페이지를 제공하므로 에러를 JSON 본문으로 내보내지 않고,
//! 서버 로그에 남긴 뒤 안전한 페이지(로그인, 회원가입, 홈)로 리다이렉트합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! match state.users.verify_password(&form.username, &form.password).await {
//!     Ok(user) => { /* 세션 생성 */ }
//!     Err(e) => return Ok(e.log_and_redirect("/login")),
//! }
//! ```

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::views;

/// 애플리케이션 전역 에러 타입
///
/// 모든 변형은 사용자에게 상세 메시지를 노출하지 않습니다.
/// 메시지는 로그 전용입니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 존재하지 않는 사용자명, 비밀번호 불일치, 비밀번호 없는 OAuth 계정
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// 사용자명 중복 또는 누락된 필드
    #[error("Duplicate or invalid registration: {0}")]
    DuplicateOrInvalidRegistration(String),

    /// MongoDB 연결/쿼리 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 세션 저장소(Redis) 실패
    #[error("Session store error: {0}")]
    SessionStoreError(String),

    /// 보호된 페이지에 익명으로 접근
    #[error("Authentication required")]
    Unauthenticated,

    /// 입력값 검증 에러
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// OAuth 프로바이더 통신 실패 또는 거부
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 핸들러가 별도로 처리하지 않은 에러의 기본 리다이렉트 대상
    pub fn default_redirect(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials(_)
            | AppError::Unauthenticated
            | AppError::ExternalServiceError(_) => "/login",
            AppError::DuplicateOrInvalidRegistration(_) => "/register",
            _ => "/",
        }
    }

    /// 에러를 서버 로그에 기록합니다. 사용자에게는 아무 것도 노출하지 않습니다.
    pub fn log(&self) {
        match self {
            AppError::DatabaseError(_)
            | AppError::SessionStoreError(_)
            | AppError::InternalError(_) => log::error!("{}", self),
            AppError::Unauthenticated | AppError::NotFound(_) => log::debug!("{}", self),
            _ => log::warn!("{}", self),
        }
    }

    /// 에러를 기록하고 지정한 페이지로 리다이렉트하는 응답을 만듭니다.
    pub fn log_and_redirect(&self, location: &str) -> HttpResponse {
        self.log();
        redirect_to(location)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::NotFound(_) = self {
            self.log();
            return HttpResponse::NotFound()
                .content_type(header::ContentType::html())
                .body(views::not_found_page());
        }

        self.log_and_redirect(self.default_redirect())
    }
}

/// `302 Found` 리다이렉트 응답
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
