pub mod admin;
pub mod admission;
pub mod auth;
pub mod courses;
pub mod notifications;
pub mod payments;
pub mod system;

pub use admin::AdminService;
pub use admission::AdmissionService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use notifications::NotificationService;
pub use payments::PaymentService;
pub use system::SystemService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::CodeAuraError;
use crate::gateway::PaymentGateway;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 中取存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> actix_web::Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not configured"))
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> actix_web::Result<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Cache not configured"))
}

/// 未配置网关时为 None
pub(crate) fn gateway_from_request(request: &HttpRequest) -> Option<Arc<dyn PaymentGateway>> {
    request
        .app_data::<web::Data<Arc<dyn PaymentGateway>>>()
        .map(|g| g.get_ref().clone())
}

/// 存储层错误统一转为 500，唯一约束冲突转为 400
pub(crate) fn storage_error(code: ErrorCode, context: &str, err: CodeAuraError) -> HttpResponse {
    match err {
        CodeAuraError::Conflict(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(code, format!("{context}: {other}")))
        }
    }
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

pub(crate) fn unauthorized(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(code, message))
}
