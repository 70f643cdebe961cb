use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::staff_route;
use crate::middlewares;
use crate::models::admins::entities::AdminRole;
use crate::models::batches::requests::{BatchQueryParams, CreateBatchRequest, UpdateBatchRequest};
use crate::models::enrollments::requests::{
    EnrollRequest, EnrollmentQueryParams, UpdateEnrollmentStatusRequest,
};
use crate::services::AdmissionService;
use crate::utils::{SafeBatchIdI64, SafeEnrollmentIdI64};

// 懒加载的全局 AdmissionService 实例
pub(crate) static ADMISSION_SERVICE: Lazy<AdmissionService> =
    Lazy::new(AdmissionService::new_lazy);

// 学生
pub async fn enroll(
    req: HttpRequest,
    enroll_data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.enroll(&req, enroll_data.into_inner()).await
}

pub async fn my_enrollments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.my_enrollments(&req).await
}

pub async fn get_enrollment(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.get_enrollment(&req, enrollment_id.0).await
}

pub async fn unenroll(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.unenroll(&req, enrollment_id.0).await
}

// 后台
pub async fn update_enrollment_status(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
    status_data: web::Json<UpdateEnrollmentStatusRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .update_enrollment_status(&req, enrollment_id.0, status_data.into_inner())
        .await
}

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentQueryParams>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .list_enrollments(&req, query.into_inner())
        .await
}

pub async fn list_batches(
    req: HttpRequest,
    query: web::Query<BatchQueryParams>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.list_batches(&req, query.into_inner()).await
}

pub async fn create_batch(
    req: HttpRequest,
    batch_data: web::Json<CreateBatchRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .create_batch(&req, batch_data.into_inner())
        .await
}

pub async fn update_batch(
    req: HttpRequest,
    batch_id: SafeBatchIdI64,
    update_data: web::Json<UpdateBatchRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .update_batch(&req, batch_id.0, update_data.into_inner())
        .await
}

pub async fn delete_batch(req: HttpRequest, batch_id: SafeBatchIdI64) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.delete_batch(&req, batch_id.0).await
}

// 配置路由
pub fn configure_admission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admission")
            .service(
                web::scope("/admin")
                    .wrap(middlewares::RequireStaffRole::new_any(
                        AdminRole::staff_roles(),
                    ))
                    .wrap(middlewares::RequireAdminSession)
                    .route("/enrollments", web::get().to(list_enrollments))
                    .service(
                        web::resource("/batches")
                            .route(web::get().to(list_batches))
                            .route(web::post().to(create_batch)),
                    )
                    .service(
                        web::resource("/batches/{batch_id}")
                            .route(web::put().to(update_batch))
                            .route(web::delete().to(delete_batch)),
                    ),
            )
            // 状态修改仅后台人员
            .service(web::resource("/enrollments/{enrollment_id}/status").route(
                staff_route(
                    web::put().to(update_enrollment_status),
                    AdminRole::staff_roles(),
                ),
            ))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/enroll", web::post().to(enroll))
                    .route("/my-enrollments", web::get().to(my_enrollments))
                    .service(
                        web::resource("/enrollments/{enrollment_id}")
                            .route(web::get().to(get_enrollment))
                            .route(web::delete().to(unenroll)),
                    ),
            ),
    );
}
