use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::admins::entities::AdminRole;
use crate::models::payments::requests::{
    CreatePaymentRequest, PaymentQueryParams, UpdatePaymentStatusRequest, VerifyPaymentRequest,
};
use crate::services::PaymentService;
use crate::utils::{SafeIDI64, SafePaymentIdI64};

// 懒加载的全局 PaymentService 实例
pub(crate) static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

// 学生
pub async fn create_payment(
    req: HttpRequest,
    payment_data: web::Json<CreatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .create_payment(&req, payment_data.into_inner())
        .await
}

pub async fn verify_payment(
    req: HttpRequest,
    verify_data: web::Json<VerifyPaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .verify_payment(&req, verify_data.into_inner())
        .await
}

pub async fn payment_history(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .payment_history(&req, query.into_inner())
        .await
}

pub async fn get_payment(req: HttpRequest, payment_id: SafePaymentIdI64) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_payment(&req, payment_id.0).await
}

// 后台
pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentQueryParams>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_payments(&req, query.into_inner()).await
}

pub async fn payment_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.payment_stats(&req).await
}

pub async fn update_payment_status(
    req: HttpRequest,
    payment_id: SafeIDI64,
    status_data: web::Json<UpdatePaymentStatusRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .update_payment_status(&req, payment_id.0, status_data.into_inner())
        .await
}

pub async fn delete_payment(req: HttpRequest, payment_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.delete_payment(&req, payment_id.0).await
}

// 配置路由
pub fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/payments")
            .service(
                web::scope("/admin")
                    .wrap(middlewares::RequireStaffRole::new_any(
                        AdminRole::staff_roles(),
                    ))
                    .wrap(middlewares::RequireAdminSession)
                    .route("/all", web::get().to(list_payments))
                    .route("/dashboard", web::get().to(payment_stats))
                    .route("/{id}/update-status", web::put().to(update_payment_status))
                    .route("/{id}", web::delete().to(delete_payment)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/create", web::post().to(create_payment))
                    .route("/verify", web::post().to(verify_payment))
                    .route("/history", web::get().to(payment_history))
                    .route("/{payment_id}", web::get().to(get_payment)),
            ),
    );
}
