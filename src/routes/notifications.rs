use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::admins::entities::AdminRole;
use crate::models::notifications::requests::{
    BroadcastNotificationRequest, NotificationQueryParams, SendNotificationRequest,
};
use crate::services::NotificationService;
use crate::utils::{SafeIDI64, SafeNotificationIdI64};

// 懒加载的全局 NotificationService 实例
pub(crate) static NOTIFICATION_SERVICE: Lazy<NotificationService> =
    Lazy::new(NotificationService::new_lazy);

// 学生
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationQueryParams>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(&req, query.into_inner())
        .await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.unread_count(&req).await
}

pub async fn mark_all_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_read(&req).await
}

pub async fn get_notification(
    req: HttpRequest,
    notification_id: SafeNotificationIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .get_notification(&req, notification_id.0)
        .await
}

pub async fn mark_read(
    req: HttpRequest,
    notification_id: SafeNotificationIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_read(&req, notification_id.0).await
}

pub async fn delete_own_notification(
    req: HttpRequest,
    notification_id: SafeNotificationIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .delete_own_notification(&req, notification_id.0)
        .await
}

// 后台
pub async fn send_notification(
    req: HttpRequest,
    send_data: web::Json<SendNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .send_notification(&req, send_data.into_inner())
        .await
}

pub async fn broadcast_notification(
    req: HttpRequest,
    broadcast_data: web::Json<BroadcastNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .broadcast_notification(&req, broadcast_data.into_inner())
        .await
}

pub async fn list_all_notifications(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_all_notifications(&req, query.into_inner())
        .await
}

pub async fn delete_notification(
    req: HttpRequest,
    notification_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .delete_notification(&req, notification_id.0)
        .await
}

// 配置路由
pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notifications")
            .service(
                web::scope("/admin")
                    .wrap(middlewares::RequireStaffRole::new_any(
                        AdminRole::staff_roles(),
                    ))
                    .wrap(middlewares::RequireAdminSession)
                    .route("/send", web::post().to(send_notification))
                    .route("/broadcast", web::post().to(broadcast_notification))
                    .route("/all", web::get().to(list_all_notifications))
                    .route("/{id}", web::delete().to(delete_notification)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("", web::get().to(list_notifications))
                    .route("/unread-count", web::get().to(unread_count))
                    .route("/mark-all-read", web::put().to(mark_all_read))
                    .service(
                        web::resource("/{notification_id}")
                            .route(web::get().to(get_notification))
                            .route(web::delete().to(delete_own_notification)),
                    )
                    .route("/{notification_id}/mark-read", web::put().to(mark_read)),
            ),
    );
}
