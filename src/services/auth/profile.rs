use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    students::requests::{ChangePasswordRequest, UpdateProfileRequest},
};
use crate::services::{bad_request, not_found, storage_error, unauthorized};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_name, validate_password_simple};

use super::AuthService;

fn login_required() -> HttpResponse {
    unauthorized(ErrorCode::Unauthorized, "Unauthorized access, please login")
}

pub async fn handle_get_profile(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_student(request) {
        Some(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Profile retrieved successfully",
        ))),
        None => Ok(login_required()),
    }
}

pub async fn handle_update_profile(
    service: &AuthService,
    mut update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    if let Some(name) = update_request.name.as_mut() {
        *name = name.trim().to_string();
        if let Err(msg) = validate_name(name) {
            return Ok(bad_request(ErrorCode::StudentNameInvalid, msg));
        }
    }
    if let Some(age) = update_request.age
        && !(1..=120).contains(&age)
    {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Age must be between 1 and 120",
        ));
    }

    match storage.update_student_profile(student_id, update_request).await {
        Ok(Some(student)) => {
            RequireJWT::invalidate_student(request, student_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::StudentUpdateFailed,
            "Failed to update profile",
            e,
        )),
    }
}

pub async fn handle_change_password(
    service: &AuthService,
    password_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(student) = RequireJWT::extract_student(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    // 中间件缓存中的学生不带密码哈希，这里重新读取
    let current = match storage.get_student_by_id(student.id).await {
        Ok(Some(current)) => current,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::StudentUpdateFailed,
                "Failed to change password",
                e,
            ));
        }
    };

    if !verify_password(&password_request.old_password, &current.password_hash) {
        return Ok(unauthorized(
            ErrorCode::AuthFailed,
            "Old password is incorrect",
        ));
    }

    if let Err(msg) = validate_password_simple(&password_request.new_password) {
        return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
    }

    let password_hash = match hash_password(&password_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::StudentUpdateFailed,
                "Failed to change password",
                e,
            ));
        }
    };

    match storage.update_student_password(current.id, &password_hash).await {
        Ok(true) => {
            RequireJWT::invalidate_student(request, current.id).await;
            tracing::info!("Student {} changed password", current.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Password changed successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::StudentUpdateFailed,
            "Failed to change password",
            e,
        )),
    }
}
