use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::Header,
    web, Error, HttpMessage,
};
use actix_web_httpauth::headers::authorization::{Authorization, Basic};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::error::AppError;
use crate::models::User;
use crate::services::UserService;

/// Paths under `/api` reachable without credentials.
const PUBLIC_PATHS: [&str; 2] = ["/api/users/register", "/api/auth/login"];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS
        .iter()
        .any(|public| path.trim_end_matches('/') == *public)
}

fn malformed() -> AppError {
    AppError::Unauthorized("Missing or malformed credentials".into())
}

/// Verifies the request's Basic credentials through the registered `UserService`.
async fn authenticate(req: &ServiceRequest) -> Result<User, AppError> {
    let credentials = Authorization::<Basic>::parse(req)
        .map_err(|_| malformed())?
        .into_scheme();
    let password = credentials.password().ok_or_else(malformed)?;

    let users = req
        .app_data::<web::Data<UserService>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("UserService not configured".into()))?;

    users.authenticate(credentials.user_id(), password).await
}

/// Requires HTTP Basic credentials on every request except registration and login.
///
/// On success the `User` is inserted in the request extensions for
/// `AuthenticatedUser` to pick up. On failure the request never reaches the
/// handler and a 401 response with a Basic challenge is returned.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        if is_public(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    log::warn!(
                        "Basic authentication failed for {} {}: {}",
                        req.method(),
                        req.path(),
                        err
                    );
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}
