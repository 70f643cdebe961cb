/*!
 * 后台角色访问控制中间件
 *
 * 必须在 RequireAdminSession 之后使用。
 *
 * ```rust,ignore
 * web::scope("/students/{id}")
 *     .wrap(RequireStaffRole::new_any(AdminRole::admin_roles()))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::create_error_response;
use crate::models::{
    ErrorCode,
    admins::entities::{AdminRole, AdminSession},
};

#[derive(Clone)]
pub struct RequireStaffRole {
    allowed_roles: Vec<AdminRole>,
}

impl RequireStaffRole {
    pub fn new(role: &AdminRole) -> Self {
        Self {
            allowed_roles: vec![*role],
        }
    }

    /// 任一角色即可
    pub fn new_any(roles: &[&AdminRole]) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| **r).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireStaffRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireStaffRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireStaffRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireStaffRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<AdminRole>,
}

impl<S, B> Service<ServiceRequest> for RequireStaffRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let session = req.extensions().get::<AdminSession>().cloned();

            match session {
                Some(session) if allowed_roles.contains(&session.role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(session) => {
                    info!(
                        "Access denied for {} (role: {}). Allowed roles: {:?}",
                        session.username, session.role, allowed_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no admin session in request. Make sure RequireAdminSession is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::AdminSessionInvalid,
                            "Admin login required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
