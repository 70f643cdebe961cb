use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    students::entities::Student,
};
use crate::services::{storage_error, unauthorized};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let email = login_request.email.trim().to_lowercase();

    // 1. 根据邮箱获取学生
    let student = match storage.get_student_by_email(&email).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(unauthorized(
                ErrorCode::AuthFailed,
                "Invalid email or password",
            ));
        }
        Err(e) => return Ok(storage_error(ErrorCode::InternalServerError, "Login failed", e)),
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &student.password_hash) {
        return Ok(unauthorized(
            ErrorCode::AuthFailed,
            "Invalid email or password",
        ));
    }

    // 3. 状态检查
    if !student.can_login() {
        return Ok(account_inactive());
    }

    tracing::info!("Student {} logged in", student.id);
    issue_tokens(student, "Login successful")
}

pub(super) fn account_inactive() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::AccountInactive,
        "Account is inactive",
    ))
}

/// 签发令牌对，并通过 cookie 下发 refresh token
pub(super) fn issue_tokens(student: Student, message: &str) -> ActixResult<HttpResponse> {
    let token_pair = match JwtUtils::generate_token_pair(student.id) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token,
        expires_in: JwtUtils::access_token_expires_in(),
        student,
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, message)))
}
