//! 라우트 설정 모듈
//!
//! 페이지, 인증, 고백 라우트와 헬스체크 엔드포인트를 등록합니다.
//! 인증이 필요한 핸들러는 `CurrentUser` extractor로 보호되므로 스코프별 미들웨어는 없습니다.
//!
//! | method | path                         | handler                          |
//! |--------|------------------------------|----------------------------------|
//! | GET    | `/`                          | `pages::home`                    |
//! | GET    | `/register`, `/login`        | `pages::register_form`, `login_form` |
//! | POST   | `/register`, `/login`        | `auth::register`, `auth::login`  |
//! | GET    | `/logout`                    | `auth::logout`                   |
//! | GET    | `/auth/{provider}`           | `auth::oauth_start`              |
//! | GET    | `/auth/{provider}/confessions` | `auth::oauth_callback`         |
//! | GET    | `/confessions`               | `confessions::feed`              |
//! | GET    | `/submit`                    | `confessions::submit_form`       |
//! | POST   | `/submit`                    | `confessions::submit`            |
//! | GET    | `/health`                    | `health_check`                   |
//!
//! # Examples
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::new(state))
//!     .wrap(SessionMiddleware)
//!     .configure(configure_all_routes)
//! ```

use actix_web::{error::InternalError, get, web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::handlers;

/// 전체 미들웨어 스택을 갖춘 `App`
///
/// 마지막에 등록한 `wrap`이 가장 바깥에서 실행되므로 요청은
/// NormalizePath → Logger → Governor → SessionMiddleware 순서로 지납니다.
/// Rate Limiting이 세션 조회(Redis, MongoDB)보다 먼저 적용됩니다.
///
/// ```rust,ignore
/// HttpServer::new(move || confessions_app!(state.clone(), &governor_conf))
/// ```
#[macro_export]
macro_rules! confessions_app {
    ($state:expr, $governor_conf:expr) => {
        ::actix_web::App::new()
            .app_data($state)
            .wrap($crate::middlewares::SessionMiddleware)
            .wrap(::actix_governor::Governor::new($governor_conf))
            .wrap(::actix_web::middleware::Logger::default())
            .wrap(::actix_web::middleware::NormalizePath::trim())
            .configure($crate::routes::configure_all_routes)
    };
}

/// 폼 본문 최대 크기 (100 KiB)
pub const FORM_LIMIT_BYTES: usize = 100 * 1024;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // 폼 파싱 실패는 400 대신 해당 폼 페이지로 리다이렉트
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT_BYTES)
            .error_handler(|err, req| {
                let response = AppError::ValidationError(err.to_string())
                    .log_and_redirect(form_error_redirect(req.path()));
                InternalError::from_response(err, response).into()
            }),
    );

    // Health check endpoint
    cfg.service(health_check);

    configure_page_routes(cfg);
    configure_auth_routes(cfg);
    configure_confession_routes(cfg);
}

fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::pages::home)
        .service(handlers::pages::register_form)
        .service(handlers::pages::login_form);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::register)
        .service(handlers::auth::login)
        .service(handlers::auth::logout)
        .service(handlers::auth::oauth_start)
        .service(handlers::auth::oauth_callback);
}

fn configure_confession_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::confessions::feed)
        .service(handlers::confessions::submit_form)
        .service(handlers::confessions::submit);
}

/// 폼을 다시 보여줄 페이지
fn form_error_redirect(path: &str) -> &'static str {
    match path {
        "/login" => "/login",
        "/register" => "/register",
        "/submit" => "/submit",
        _ => "/",
    }
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "confessions",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "sessions": "Redis",
            "oauth": ["google", "facebook"]
        }
    }))
}
