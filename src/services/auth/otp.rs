//! 手机号验证码登录
//!
//! 验证码保存在对象缓存中，键为 `otp:{phone}`，校验成功后立即删除。
//! 同一手机号连续输错 [`MAX_OTP_ATTEMPTS`] 次后验证码作废，需重新获取。
//! 短信下发不在本服务内，验证码仅以 debug 级别记录。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::{CacheResult, ObjectCache};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::{PhoneLoginRequest, VerifyOtpRequest},
        responses::OtpSentResponse,
    },
};
use crate::services::{bad_request, cache_from_request, not_found, storage_error, unauthorized};
use crate::utils::random_code::generate_otp;
use crate::utils::validate::validate_phone;

use super::AuthService;
use super::login::{account_inactive, issue_tokens};

/// 单个验证码允许的错误次数
pub const MAX_OTP_ATTEMPTS: u32 = 5;

pub fn otp_cache_key(phone: &str) -> String {
    format!("otp:{phone}")
}

pub fn otp_attempts_key(phone: &str) -> String {
    format!("otp_attempts:{phone}")
}

/// 记录一次错误输入，返回累计次数
async fn record_failed_attempt(cache: &dyn ObjectCache, phone: &str, ttl: u64) -> u32 {
    let key = otp_attempts_key(phone);
    let attempts = match cache.get_raw(&key).await {
        CacheResult::Found(raw) => raw.parse::<u32>().unwrap_or(0),
        _ => 0,
    }
    .saturating_add(1);
    cache.insert_raw(key, attempts.to_string(), ttl).await;
    attempts
}

pub async fn handle_send_otp(
    service: &AuthService,
    phone_request: PhoneLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = cache_from_request(request)?;
    let phone = phone_request.phone.trim().to_string();

    if let Err(msg) = validate_phone(&phone) {
        return Ok(bad_request(ErrorCode::StudentPhoneInvalid, msg));
    }

    match storage.get_student_by_phone(&phone).await {
        Ok(Some(student)) if !student.can_login() => return Ok(account_inactive()),
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::StudentNotFound,
                "No student registered with this phone number",
            ));
        }
        Err(e) => return Ok(storage_error(ErrorCode::InternalServerError, "Login failed", e)),
    }

    let ttl = service.get_config().auth.otp_ttl;
    let otp = generate_otp();
    cache.insert_raw(otp_cache_key(&phone), otp.clone(), ttl).await;
    cache.remove(&otp_attempts_key(&phone)).await;
    tracing::debug!("OTP for {}: {}", phone, otp);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        OtpSentResponse {
            phone,
            expires_in: ttl,
        },
        "OTP sent",
    )))
}

pub async fn handle_verify_otp(
    service: &AuthService,
    verify_request: VerifyOtpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = cache_from_request(request)?;
    let phone = verify_request.phone.trim().to_string();
    let key = otp_cache_key(&phone);

    // 1. 校验验证码
    let matched = match cache.get_raw(&key).await {
        CacheResult::Found(expected) => {
            if expected == verify_request.otp.trim() {
                true
            } else {
                let ttl = service.get_config().auth.otp_ttl;
                let attempts = record_failed_attempt(cache.as_ref(), &phone, ttl).await;
                if attempts >= MAX_OTP_ATTEMPTS {
                    tracing::warn!("OTP for {} revoked after {} failed attempts", phone, attempts);
                    cache.remove(&key).await;
                    cache.remove(&otp_attempts_key(&phone)).await;
                }
                false
            }
        }
        _ => false,
    };
    if !matched {
        return Ok(unauthorized(ErrorCode::OtpInvalid, "Invalid or expired OTP"));
    }
    cache.remove(&key).await;
    cache.remove(&otp_attempts_key(&phone)).await;

    // 2. 获取学生并签发令牌
    match storage.get_student_by_phone(&phone).await {
        Ok(Some(student)) if !student.can_login() => Ok(account_inactive()),
        Ok(Some(student)) => {
            tracing::info!("Student {} logged in with OTP", student.id);
            issue_tokens(student, "Login successful")
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error(ErrorCode::InternalServerError, "Login failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_key_per_phone() {
        assert_eq!(otp_cache_key("9876543210"), "otp:9876543210");
        assert_eq!(otp_attempts_key("9876543210"), "otp_attempts:9876543210");
    }

    #[tokio::test]
    async fn test_failed_attempts_accumulate() {
        let cache = crate::cache::object_cache::moka::MokaCacheWrapper::new(100, 300);
        for expected in 1..=3 {
            assert_eq!(record_failed_attempt(&cache, "9876543210", 300).await, expected);
        }
        // 其他手机号独立计数
        assert_eq!(record_failed_attempt(&cache, "9123456789", 300).await, 1);
    }
}
