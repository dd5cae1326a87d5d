//! 고백 게시판 백엔드
//!
//! 로컬 계정(사용자명/비밀번호)과 Google/Facebook OAuth로 로그인한 사용자가
//! 각자 하나의 익명 고백을 남기고, 로그인한 모든 사용자가 고백 목록을 볼 수 있는 서비스입니다.
//!
//! # Features
//!
//! - **로컬 인증**: bcrypt 해시 비밀번호
//! - **OAuth 2.0**: Google, Facebook 로그인 (프로바이더 ID로 원자적 find-or-create)
//! - **서버 측 세션**: 서명 쿠키 + Redis 세션 저장소
//! - **MongoDB**: 사용자와 고백 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     Routes      │ ← 페이지/폼 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SessionMiddleware│ ← 쿠키 → 세션 → CurrentUser
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← HTML 렌더링 / 리다이렉트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (AppState)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / SessionStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
pub mod views;
