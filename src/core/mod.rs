//! # Core Module
//!
//! 애플리케이션 조립을 담당합니다.
//!
//! ### [`state`] - 공유 서비스 컨테이너
//! - **AppState**: 서비스와 세션 쿠키 키를 묶어 `web::Data`로 전달
//! - **명시적 의존성**: 저장소 구현은 `main`에서 선택해 trait 객체로 주입
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! let state = AppState::from_config(user_store, session_store, oauth_client);
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(state.clone()))
//!         .wrap(SessionMiddleware)
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod state;

pub use state::AppState;
