/*!
 * 后台会话中间件
 *
 * 后台人员登录后获得一个不透明的会话 ID（cookie），会话内容保存在缓存
 * `admin_session:{id}` 中，过期时间为 `admin.session_ttl`。
 * 通过校验后 [`AdminSession`] 写入请求扩展。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::{ErrorCode, admins::entities::AdminSession};

#[derive(Clone)]
pub struct RequireAdminSession;

pub fn session_cache_key(session_id: &str) -> String {
    format!("admin_session:{session_id}")
}

async fn load_session(req: &ServiceRequest) -> Option<AdminSession> {
    let cookie_name = &AppConfig::get().admin.cookie_name;
    let session_id = req.cookie(cookie_name)?.value().to_string();
    if session_id.is_empty() {
        return None;
    }

    let cache = req.app_data::<web::Data<Arc<dyn ObjectCache>>>()?;
    match cache.get_json::<AdminSession>(&session_cache_key(&session_id)).await {
        CacheResult::Found(session) => Some(session),
        _ => None,
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAdminSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAdminSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminSessionMiddleware<S>
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
        Box::pin(async move {
            match load_session(&req).await {
                Some(session) => {
                    debug!(
                        "Admin session accepted for {} ({})",
                        session.username, session.role
                    );
                    req.extensions_mut().insert(session);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                None => {
                    info!("Admin session missing or expired for {}", req.path());
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

impl RequireAdminSession {
    pub fn extract_session(req: &actix_web::HttpRequest) -> Option<AdminSession> {
        req.extensions().get::<AdminSession>().cloned()
    }
}
