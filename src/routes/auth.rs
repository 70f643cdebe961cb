use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{
    LoginRequest, PhoneLoginRequest, RegisterRequest, VerifyOtpRequest,
};
use crate::models::students::requests::{ChangePasswordRequest, UpdateProfileRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register(
    req: HttpRequest,
    student_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(student_data.into_inner(), &req).await
}

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(login_data.into_inner(), &req).await
}

pub async fn login_phone(
    req: HttpRequest,
    phone_data: web::Json<PhoneLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login_phone(phone_data.into_inner(), &req).await
}

pub async fn verify_otp(
    req: HttpRequest,
    otp_data: web::Json<VerifyOtpRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_otp(otp_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn get_profile(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_profile(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    profile_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_profile(profile_data.into_inner(), &req)
        .await
}

pub async fn change_password(
    req: HttpRequest,
    password_data: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .change_password(password_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route(
                "/register",
                web::post()
                    .to(register)
                    .wrap(middlewares::RateLimit::register()),
            )
            .route(
                "/login",
                web::post().to(login).wrap(middlewares::RateLimit::login()),
            )
            .route(
                "/login-phone",
                web::post()
                    .to(login_phone)
                    .wrap(middlewares::RateLimit::otp()),
            )
            .route(
                "/verify-otp",
                web::post()
                    .to(verify_otp)
                    .wrap(middlewares::RateLimit::otp()),
            )
            .route(
                "/refresh",
                web::post()
                    .to(refresh_token)
                    .wrap(middlewares::RateLimit::refresh_token()),
            )
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("/profile")
                            .route(web::get().to(get_profile))
                            .route(web::put().to(update_profile)),
                    )
                    .route("/change-password", web::post().to(change_password)),
            ),
    );
}
