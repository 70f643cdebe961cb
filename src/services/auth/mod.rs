pub mod login;
pub mod otp;
pub mod profile;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::auth::requests::{
    LoginRequest, PhoneLoginRequest, RegisterRequest, VerifyOtpRequest,
};
use crate::models::students::requests::{ChangePasswordRequest, UpdateProfileRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 学生注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 邮箱密码登录
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 手机号登录，下发验证码
    pub async fn login_phone(
        &self,
        phone_request: PhoneLoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        otp::handle_send_otp(self, phone_request, request).await
    }

    // 校验验证码并登录
    pub async fn verify_otp(
        &self,
        verify_request: VerifyOtpRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        otp::handle_verify_otp(self, verify_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 注销
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_logout(self, request).await
    }

    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_profile(self, request).await
    }

    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, update_request, request).await
    }

    pub async fn change_password(
        &self,
        password_request: ChangePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_change_password(self, password_request, request).await
    }
}
