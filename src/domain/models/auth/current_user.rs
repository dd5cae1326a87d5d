//! 현재 요청의 인증된 사용자
//!
//! `SessionMiddleware`가 세션 쿠키를 확인한 뒤 Request Extensions에 넣어 둔 값을
//! 핸들러 인자로 꺼내는 extractor입니다.
//!
//! ```rust,ignore
//! #[get("/confessions")]
//! async fn feed(current: CurrentUser) -> HttpResponse {
//!     // 익명 요청은 여기 도달하기 전에 /login 으로 리다이렉트됩니다
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::domain::entities::users::User;
use crate::errors::AppError;

/// 인증된 사용자와 그 세션 토큰
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session_token: String,
}

impl CurrentUser {
    pub fn user_id(&self) -> Option<String> {
        self.user.id_string()
    }
}

/// 익명 요청이면 `AppError::Unauthenticated`로 실패하여 `/login` 리다이렉트가 됩니다.
impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(current) => ready(Ok(current.clone())),
            None => ready(Err(AppError::Unauthenticated)),
        }
    }
}

/// 공개 페이지용. 익명이어도 실패하지 않습니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

impl OptionalUser {
    pub fn current(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }

    pub fn session_token(&self) -> Option<&str> {
        self.0.as_ref().map(|current| current.session_token.as_str())
    }
}

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let current = req.extensions().get::<CurrentUser>().cloned();
        ready(Ok(OptionalUser(current)))
    }
}
