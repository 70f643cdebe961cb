use crate::models::students::entities::Student;
use serde::Serialize;

// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// 秒
    pub expires_in: i64,
    pub student: Student,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct OtpSentResponse {
    pub phone: String,
    pub expires_in: u64,
}
