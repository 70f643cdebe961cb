use serde::Deserialize;

// 学生注册请求
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub stream: Option<String>,
    pub age: Option<i32>,
}

// 邮箱密码登录
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// 手机号登录，下发验证码
#[derive(Debug, Deserialize)]
pub struct PhoneLoginRequest {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
}
