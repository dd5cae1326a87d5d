//! Authentication HTTP Handlers
//!
//! 로컬 회원가입/로그인, 로그아웃, OAuth 2.0 로그인을 처리합니다.
//! 성공하면 새 세션 쿠키와 함께 `/confessions`로, 실패하면 로그를 남기고
//! 폼 페이지로 리다이렉트합니다. 실패 사유는 화면에 보여주지 않습니다.
//!
//! # Auth Providers
//!
//! - **로컬 인증**: 사용자명/비밀번호 (`POST /register`, `POST /login`)
//! - **OAuth 2.0**: Google, Facebook (`GET /auth/{provider}`, `/auth/{provider}/confessions`)

use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    config::OAuthProvider,
    core::AppState,
    domain::{
        dto::users::request::{LoginRequest, OAuthCallbackQuery, RegisterRequest},
        entities::users::User,
        models::auth::OptionalUser,
    },
    errors::AppError,
    middlewares::OAUTH_STATE_COOKIE_NAME,
    services::auth::OAuthService,
    utils::string_utils::clean_optional_string,
};

/// 세션을 발급하고 세션 쿠키와 함께 `/confessions`로 보냅니다.
///
/// 이전 세션이 있으면 폐기합니다.
async fn login_and_redirect(
    state: &AppState,
    user: &User,
    previous_token: Option<&str>,
    failure_location: &str,
) -> HttpResponse {
    match state.sessions.establish(user, previous_token).await {
        Ok(token) => HttpResponse::Found()
            .insert_header((header::LOCATION, "/confessions"))
            .cookie(state.cookies.session_cookie(&token))
            .finish(),
        Err(e) => e.log_and_redirect(failure_location),
    }
}

fn parse_provider(raw: &str) -> Result<OAuthProvider, AppError> {
    OAuthProvider::from_str(raw).map_err(AppError::NotFound)
}

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    current: OptionalUser,
    form: web::Form<RegisterRequest>,
) -> HttpResponse {
    match state.users.register_local(form.into_inner()).await {
        Ok(user) => login_and_redirect(&state, &user, current.session_token(), "/login").await,
        Err(e) => e.log_and_redirect("/register"),
    }
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    current: OptionalUser,
    form: web::Form<LoginRequest>,
) -> HttpResponse {
    if let Err(e) = form.validate() {
        return AppError::InvalidCredentials(e.to_string()).log_and_redirect("/login");
    }

    match state.users.verify_password(&form.username, &form.password).await {
        Ok(user) => {
            log::info!("🔑 로컬 로그인: {}", user.display_name());
            login_and_redirect(&state, &user, current.session_token(), "/login").await
        }
        Err(e) => e.log_and_redirect("/login"),
    }
}

#[get("/logout")]
pub async fn logout(state: web::Data<AppState>, current: OptionalUser) -> HttpResponse {
    if let Some(token) = current.session_token() {
        if let Err(e) = state.sessions.invalidate(token).await {
            e.log();
        }
    }

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(state.cookies.session_removal())
        .finish()
}

/// 프로바이더 동의 화면으로 리다이렉트
///
/// 설정되지 않은 프로바이더는 `/login`으로, 알 수 없는 프로바이더는 404입니다.
#[get("/auth/{provider}")]
pub async fn oauth_start(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path.into_inner())?;

    let oauth_state = OAuthService::generate_state();
    let url = match state.oauth.authorization_url(provider, &oauth_state) {
        Ok(url) => url,
        Err(e) => return Ok(e.log_and_redirect("/login")),
    };

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .cookie(state.cookies.oauth_state_cookie(&oauth_state))
        .finish())
}

/// OAuth 콜백
///
/// 프로바이더 에러, state 불일치, 코드 누락, 교환 실패는 모두 `/login`으로 보냅니다.
#[get("/auth/{provider}/confessions")]
pub async fn oauth_callback(
    req: HttpRequest,
    state: web::Data<AppState>,
    current: OptionalUser,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path.into_inner())?;
    let query = query.into_inner();

    let mut response = match authenticate_callback(&req, &state, provider, query).await {
        Ok(user) => login_and_redirect(&state, &user, current.session_token(), "/login").await,
        Err(e) => e.log_and_redirect("/login"),
    };

    // state는 한 번만 사용합니다
    if let Err(e) = response.add_cookie(&state.cookies.oauth_state_removal()) {
        log::warn!("OAuth state 쿠키 제거 실패: {}", e);
    }

    Ok(response)
}

async fn authenticate_callback(
    req: &HttpRequest,
    state: &AppState,
    provider: OAuthProvider,
    query: OAuthCallbackQuery,
) -> Result<User, AppError> {
    if let Some(error) = query.error {
        return Err(AppError::ExternalServiceError(format!(
            "{} OAuth 거부: {} - {}",
            provider.display_name(),
            error,
            query.error_description.unwrap_or_default()
        )));
    }

    let expected_state = req
        .cookie(OAUTH_STATE_COOKIE_NAME)
        .and_then(|cookie| state.cookies.verify(cookie));

    match (expected_state, clean_optional_string(query.state)) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => {
            return Err(AppError::ExternalServiceError(format!(
                "{} OAuth state 불일치",
                provider.display_name()
            )));
        }
    }

    let code = clean_optional_string(query.code).ok_or_else(|| {
        AppError::ExternalServiceError(format!("{} OAuth 인가 코드 누락", provider.display_name()))
    })?;

    state.oauth.authenticate(provider, &code).await
}
