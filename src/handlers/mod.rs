//! HTTP 요청 핸들러 모듈
//!
//! 모든 핸들러는 HTML 페이지 또는 `302 Found` 리다이렉트를 반환합니다.
//!
//! # Modules
//!
//! - [`pages`] - 홈, 로그인/회원가입 폼
//! - [`auth`] - 회원가입, 로그인, 로그아웃, OAuth
//! - [`confessions`] - 고백 피드와 제출

use actix_web::{http::header::ContentType, HttpResponse};

pub mod auth;
pub mod confessions;
pub mod pages;

#[cfg(test)]
mod tests;

/// `200 OK` HTML 응답
pub(crate) fn render_html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}
