//! SessionMiddleware 세션 확인 로직
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::core::state::AppState;
use crate::domain::models::auth::CurrentUser;
use crate::errors::AppError;
use crate::middlewares::session_cookie::SESSION_COOKIE_NAME;

pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match req.app_data::<web::Data<AppState>>().cloned() {
                Some(state) => match resolve_current_user(&req, &state).await {
                    Ok(Some(current)) => {
                        log::debug!("세션 확인: 사용자 ID {}", current.user_id().unwrap_or_default());
                        req.extensions_mut().insert(current);
                    }
                    Ok(None) => {}
                    // 저장소 장애 시 익명으로 진행합니다
                    Err(e) => log::error!("세션 확인 실패, 익명으로 진행: {}", e),
                },
                None => log::warn!("AppState가 등록되지 않아 세션을 확인할 수 없습니다"),
            }

            service.call(req).await
        })
    }
}

async fn resolve_current_user(
    req: &ServiceRequest,
    state: &AppState,
) -> Result<Option<CurrentUser>, AppError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE_NAME) else {
        return Ok(None);
    };

    let Some(token) = state.cookies.verify(cookie) else {
        log::debug!("서명이 유효하지 않은 세션 쿠키");
        return Ok(None);
    };

    let Some(record) = state.sessions.resolve(&token).await? else {
        return Ok(None);
    };

    match state.users.find_by_id(&record.user_id).await? {
        Some(user) => Ok(Some(CurrentUser {
            user,
            session_token: token,
        })),
        None => {
            log::warn!("세션의 사용자가 존재하지 않아 세션을 폐기합니다: {}", record.user_id);
            state.sessions.invalidate(&token).await?;
            Ok(None)
        }
    }
}
