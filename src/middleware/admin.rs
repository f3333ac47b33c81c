use crate::database::DocumentStore;
use crate::services::{token_service::Claims, user_service};
use crate::utils::{AppError, AppResult};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Lets the request through only when the authenticated email belongs to a
/// stored user whose role is exactly `"admin"`.
///
/// Must run after `AuthMiddleware`: register it with `.wrap()` before the
/// auth middleware so that auth ends up outermost.
pub struct AdminGuard;

impl<S, B> Transform<S, ServiceRequest> for AdminGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let authorized = authorize(&req).await;
            match authorized {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    log::warn!("🚫 {} {} - {}", req.method(), req.path(), e);
                    Ok(req.error_response(e).map_into_right_body())
                }
            }
        })
    }
}

async fn authorize(req: &ServiceRequest) -> AppResult<()> {
    let email = req
        .extensions()
        .get::<Claims>()
        .and_then(|claims| claims.email().map(str::to_string))
        .ok_or(AppError::Unauthenticated)?;

    let store = req
        .app_data::<web::Data<dyn DocumentStore>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("document store not configured".to_string()))?;

    user_service::require_admin(store.get_ref(), &email).await?;
    log::debug!("👑 Admin access granted: {}", email);
    Ok(())
}
