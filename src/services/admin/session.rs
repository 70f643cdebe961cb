//! 后台会话
//!
//! 会话 id 为随机 UUID，通过 http-only cookie 下发，会话内容保存在对象缓存中。

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::config::AppConfig;
use crate::middlewares::RequireAdminSession;
use crate::middlewares::require_admin::session_cache_key;
use crate::models::admins::{
    entities::AdminSession, requests::AdminLoginRequest, responses::AdminLoginResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{cache_from_request, storage_error, unauthorized};
use crate::utils::password::verify_password;

fn session_cookie(session_id: &str, ttl: u64) -> Cookie<'static> {
    let config = AppConfig::get();
    Cookie::build(config.admin.cookie_name.clone(), session_id.to_string())
        .path("/")
        .max_age(actix_web::cookie::time::Duration::seconds(ttl as i64))
        .same_site(SameSite::Strict)
        .http_only(true)
        .secure(config.is_production())
        .finish()
}

fn invalid_credentials() -> HttpResponse {
    unauthorized(ErrorCode::AdminAuthFailed, "Invalid username or password")
}

pub async fn login(
    service: &AdminService,
    request: &HttpRequest,
    login_request: AdminLoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = cache_from_request(request)?;

    // 1. 校验账号密码
    let admin = match storage
        .get_admin_by_username(login_request.username.trim())
        .await
    {
        Ok(Some(admin)) => admin,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Admin login failed",
                e,
            ));
        }
    };
    if !verify_password(&login_request.password, &admin.password_hash) {
        tracing::warn!("Failed admin login for {}", admin.username);
        return Ok(invalid_credentials());
    }

    // 2. 写入会话
    let ttl = service.get_config().admin.session_ttl;
    let session_id = uuid::Uuid::new_v4().to_string();
    let session = AdminSession::from(&admin);
    cache
        .insert_json(session_cache_key(&session_id), &session, ttl)
        .await;

    tracing::info!("Admin {} logged in", admin.username);

    let response = AdminLoginResponse {
        admin_id: admin.id,
        username: admin.username,
        role: admin.role,
        expires_in: ttl,
    };
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&session_id, ttl))
        .json(ApiResponse::success(response, "Login successful")))
}

pub async fn logout(service: &AdminService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let cache = cache_from_request(request)?;
    let cookie_name = &service.get_config().admin.cookie_name;

    if let Some(cookie) = request.cookie(cookie_name) {
        cache.remove(&session_cache_key(cookie.value())).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(session_cookie("", 0))
        .json(ApiResponse::success_empty("Logged out")))
}

pub async fn me(_service: &AdminService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireAdminSession::extract_session(request) {
        Some(session) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            session,
            "Session retrieved successfully",
        ))),
        None => Ok(unauthorized(
            ErrorCode::AdminSessionInvalid,
            "Admin login required",
        )),
    }
}
