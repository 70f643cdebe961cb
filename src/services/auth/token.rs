use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, auth::responses::RefreshTokenResponse};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_refresh_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 依次从 Authorization 头和 cookie 中提取 refresh token
    let Some(refresh_token) = JwtUtils::extract_refresh_token(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Refresh token required",
        )));
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => {
            let response = RefreshTokenResponse {
                access_token,
                expires_in: JwtUtils::access_token_expires_in(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::warn!("Refresh token rejected: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();
            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ))
        }
    }
}

pub async fn handle_logout(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::success_empty("Logged out")))
}
