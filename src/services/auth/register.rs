use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::errors::CodeAuraError;
use crate::models::{
    ApiResponse, ErrorCode, auth::requests::RegisterRequest, students::requests::NewStudent,
};
use crate::services::{bad_request, storage_error};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_name, validate_password_simple, validate_phone,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let name = register_request.name.trim().to_string();
    let email = register_request.email.trim().to_lowercase();
    let phone = register_request.phone.trim().to_string();

    // 1. 字段校验
    if let Err(msg) = validate_name(&name) {
        return Ok(bad_request(ErrorCode::StudentNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(ErrorCode::StudentEmailInvalid, msg));
    }
    if let Err(msg) = validate_phone(&phone) {
        return Ok(bad_request(ErrorCode::StudentPhoneInvalid, msg));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
    }
    if let Some(age) = register_request.age
        && !(1..=120).contains(&age)
    {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Age must be between 1 and 120",
        ));
    }

    // 2. 唯一性检查
    if let Err(response) = check_email_available(&storage, &email).await {
        return Ok(response);
    }
    if let Err(response) = check_phone_available(&storage, &phone).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::RegisterFailed,
                "Password hashing failed",
                e,
            ));
        }
    };

    // 4. 创建学生
    let new_student = NewStudent {
        name,
        phone,
        email,
        password_hash,
        stream: register_request
            .stream
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        age: register_request.age,
    };

    match storage.create_student(new_student).await {
        Ok(student) => {
            info!("Student {} registered", student.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Registration successful",
            )))
        }
        // 并发注册时唯一约束兜底
        Err(CodeAuraError::Conflict(detail)) => Ok(conflict_response(&detail)),
        Err(e) => Ok(storage_error(ErrorCode::RegisterFailed, "Registration failed", e)),
    }
}

fn conflict_response(detail: &str) -> HttpResponse {
    if detail.contains("phone") {
        bad_request(
            ErrorCode::StudentPhoneAlreadyExists,
            "Phone number already registered",
        )
    } else {
        bad_request(ErrorCode::StudentEmailAlreadyExists, "Email already registered")
    }
}

async fn check_email_available(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_student_by_email(email).await {
        Ok(Some(_)) => Err(bad_request(
            ErrorCode::StudentEmailAlreadyExists,
            "Email already registered",
        )),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_error(ErrorCode::RegisterFailed, "Registration failed", e)),
    }
}

async fn check_phone_available(storage: &Arc<dyn Storage>, phone: &str) -> Result<(), HttpResponse> {
    match storage.get_student_by_phone(phone).await {
        Ok(Some(_)) => Err(bad_request(
            ErrorCode::StudentPhoneAlreadyExists,
            "Phone number already registered",
        )),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_error(ErrorCode::RegisterFailed, "Registration failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_names_the_field() {
        let response = conflict_response("UNIQUE constraint failed: students.phone");
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
