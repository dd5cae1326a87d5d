//! 고백 피드/제출 핸들러
//!
//! 모두 로그인이 필요합니다. 익명 요청은 `CurrentUser` extractor가 `/login`으로 보냅니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    core::AppState,
    domain::{dto::users::request::SubmitConfessionRequest, models::auth::CurrentUser},
    errors::{redirect_to, AppError},
    handlers::render_html,
    views,
};

#[get("/confessions")]
pub async fn feed(current: CurrentUser, state: web::Data<AppState>) -> HttpResponse {
    match state.users.list_confessions().await {
        Ok(entries) => render_html(views::confessions_page(&current, &entries)),
        Err(e) => e.log_and_redirect("/"),
    }
}

#[get("/submit")]
pub async fn submit_form(current: CurrentUser) -> HttpResponse {
    render_html(views::submit_page(&current))
}

/// 현재 사용자의 고백을 덮어씁니다.
#[post("/submit")]
pub async fn submit(
    current: CurrentUser,
    state: web::Data<AppState>,
    form: web::Form<SubmitConfessionRequest>,
) -> HttpResponse {
    if let Err(e) = form.validate() {
        return AppError::ValidationError(e.to_string()).log_and_redirect("/submit");
    }

    let Some(user_id) = current.user_id() else {
        return AppError::InternalError("세션 사용자에 ID가 없습니다".to_string()).log_and_redirect("/");
    };
    let confession = form.into_inner().confession.unwrap_or_default();

    match state.users.submit_confession(&user_id, &confession).await {
        Ok(_) => redirect_to("/confessions"),
        Err(e) => e.log_and_redirect("/"),
    }
}
