//! 공개 페이지 핸들러 (홈, 로그인/회원가입 폼)

use actix_web::{get, web, HttpResponse};

use crate::{
    core::AppState,
    domain::models::auth::OptionalUser,
    handlers::render_html,
    views,
};

#[get("/")]
pub async fn home(current: OptionalUser) -> HttpResponse {
    render_html(views::home_page(current.current()))
}

#[get("/register")]
pub async fn register_form(state: web::Data<AppState>, current: OptionalUser) -> HttpResponse {
    render_html(views::register_page(
        current.current(),
        &state.oauth.enabled_providers(),
    ))
}

#[get("/login")]
pub async fn login_form(state: web::Data<AppState>, current: OptionalUser) -> HttpResponse {
    render_html(views::login_page(
        current.current(),
        &state.oauth.enabled_providers(),
    ))
}
