use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::notifications::NOTIFICATION_SERVICE;
use super::{admission, courses, notifications, payments};
use crate::middlewares;
use crate::models::admins::entities::AdminRole;
use crate::models::admins::requests::AdminLoginRequest;
use crate::models::notifications::requests::SendNotificationRequest;
use crate::models::students::requests::StudentQueryParams;
use crate::services::AdminService;
use crate::utils::SafeStudentIdI64;

// 懒加载的全局 AdminService 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<AdminLoginRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.login(&req, login_data.into_inner()).await
}

pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.logout(&req).await
}

pub async fn me(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.me(&req).await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.dashboard(&req).await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentQueryParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn get_student(req: HttpRequest, student_id: SafeStudentIdI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_student(&req, student_id.0).await
}

pub async fn delete_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.delete_student(&req, student_id.0).await
}

// student_id 为空时写一条广播
pub async fn create_notification(
    req: HttpRequest,
    notification_data: web::Json<SendNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .create_notification(&req, notification_data.into_inner())
        .await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(
                web::resource("/login")
                    .wrap(middlewares::RateLimit::admin_login())
                    .route(web::post().to(login)),
            )
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireAdminSession)
                    .route("/me", web::get().to(me))
                    .route("/dashboard", web::get().to(dashboard))
                    .route("/students", web::get().to(list_students))
                    .service(
                        web::resource("/students/{student_id}")
                            .route(web::get().to(get_student))
                            // 删除学生仅限 admin
                            .route(
                                web::delete()
                                    .to(delete_student)
                                    .wrap(middlewares::RequireStaffRole::new(&AdminRole::Admin)),
                            ),
                    )
                    .service(
                        web::resource("/courses")
                            .route(web::get().to(courses::list_courses))
                            .route(web::post().to(courses::create_course)),
                    )
                    .service(
                        web::resource("/courses/{course_id}")
                            .route(web::put().to(courses::update_course))
                            .route(web::delete().to(courses::delete_course)),
                    )
                    .service(
                        web::resource("/batches")
                            .route(web::get().to(admission::list_batches))
                            .route(web::post().to(admission::create_batch)),
                    )
                    .service(
                        web::resource("/batches/{batch_id}")
                            .route(web::put().to(admission::update_batch))
                            .route(web::delete().to(admission::delete_batch)),
                    )
                    .route("/enrollments", web::get().to(admission::list_enrollments))
                    .route(
                        "/enrollments/{enrollment_id}",
                        web::put().to(admission::update_enrollment_status),
                    )
                    .route("/payments", web::get().to(payments::list_payments))
                    .route("/payments/{id}", web::put().to(payments::update_payment_status))
                    .service(
                        web::resource("/notifications")
                            .route(web::get().to(notifications::list_all_notifications))
                            .route(web::post().to(create_notification)),
                    ),
            ),
    );
}
