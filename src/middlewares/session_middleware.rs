//! 세션 미들웨어
//!
//! 모든 요청에서 세션 쿠키를 확인하고 유효하면 [`CurrentUser`]를 Request Extensions에 넣습니다.
//! 요청을 차단하지 않습니다. 보호된 페이지는 `CurrentUser` extractor가 `/login`으로 보냅니다.
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::new(state))
//!     .wrap(SessionMiddleware)
//!     .configure(configure_all_routes)
//! ```
//!
//! [`CurrentUser`]: crate::domain::models::auth::CurrentUser

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};

use crate::middlewares::session_inner::SessionMiddlewareService;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
