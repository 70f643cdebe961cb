/*!
 * 学生 JWT 认证中间件
 *
 * 客户端在请求头中携带 `Authorization: Bearer <access_token>`。
 * 令牌有效且学生未被停用时，学生信息写入请求扩展，处理程序通过
 * [`RequireJWT::extract_student`] / [`RequireJWT::extract_student_id`] 读取。
 *
 * ```rust,ignore
 * web::scope("/api/admission")
 *     .wrap(RequireJWT)
 *     .route("/my-enrollments", web::get().to(my_enrollments))
 * ```
 *
 * 学生信息按 ID 缓存在 `student:{id}`，资料或密码变更时调用
 * [`RequireJWT::invalidate_student`] 清除。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::students::entities::Student;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
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

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败的原因，决定返回 401 还是 403
enum AuthFailure {
    Unauthorized(String),
    Inactive,
    Internal(String),
}

fn student_cache_key(student_id: i64) -> String {
    format!("student:{student_id}")
}

async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Student, AuthFailure> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| AuthFailure::Unauthorized("Missing or invalid Authorization header".into()))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid or expired token".into())
    })?;

    let student_id = claims
        .student_id()
        .ok_or_else(|| AuthFailure::Unauthorized("Invalid student ID in token".into()))?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Cache not configured".into()))?;

    let key = student_cache_key(student_id);
    if let CacheResult::Found(student) = cache.get_json::<Student>(&key).await {
        return Ok(student);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Storage not configured".into()))?;

    let student = storage
        .get_student_by_id(student_id)
        .await
        .map_err(|e| AuthFailure::Internal(format!("Failed to load student: {e}")))?
        .ok_or_else(|| AuthFailure::Unauthorized("Student not found".into()))?;

    if !student.can_login() {
        return Err(AuthFailure::Inactive);
    }

    cache
        .insert_json(key, &student, AppConfig::get().cache.default_ttl)
        .await;

    Ok(student)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(student) => {
                    debug!("JWT authentication successful for student {}", student.id);
                    req.extensions_mut().insert(student);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    let (status, code, message) = match failure {
                        AuthFailure::Unauthorized(msg) => {
                            (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg)
                        }
                        AuthFailure::Inactive => (
                            StatusCode::FORBIDDEN,
                            ErrorCode::AccountInactive,
                            "Account is inactive".to_string(),
                        ),
                        AuthFailure::Internal(msg) => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            msg,
                        ),
                    };
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(status, code, &message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前学生，仅在 RequireJWT 保护的路由中可用
    pub fn extract_student(req: &actix_web::HttpRequest) -> Option<Student> {
        req.extensions().get::<Student>().cloned()
    }

    pub fn extract_student_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Student>().map(|student| student.id)
    }

    /// 清除学生缓存
    pub async fn invalidate_student(req: &actix_web::HttpRequest, student_id: i64) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&student_cache_key(student_id)).await;
        }
    }
}
