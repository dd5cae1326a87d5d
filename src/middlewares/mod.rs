//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 세션 미들웨어 (SessionMiddleware)
//! - 서명된 세션 쿠키 검증
//! - 세션 저장소에서 사용자 ID 조회 후 사용자 로드
//! - `CurrentUser`를 request extension에 저장
//! - 요청을 차단하지 않음 (익명 요청도 통과)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App, HttpServer};
//! use crate::middlewares::SessionMiddleware;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(state.clone()))
//!         .wrap(SessionMiddleware)
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod session_cookie;
mod session_inner;
pub mod session_middleware;

pub use session_cookie::{SessionCookies, OAUTH_STATE_COOKIE_NAME, SESSION_COOKIE_NAME};
pub use session_middleware::SessionMiddleware;
