use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NotificationService, login_required};
use crate::middlewares::RequireJWT;
use crate::models::notifications::{
    requests::{NotificationListQuery, NotificationQueryParams},
    responses::UnreadCountResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error;

/// 本人通知及广播，按时间倒序
pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    query: NotificationQueryParams,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    let list_query = NotificationListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: Some(student_id),
        unread_only: query.unread_only.unwrap_or(false),
    };

    match storage.list_notifications_with_pagination(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page.map(|n| n.notification),
            "Notifications retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list notifications",
            e,
        )),
    }
}

pub async fn unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    match storage.count_unread_notifications(student_id).await {
        Ok(unread_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { unread_count },
            "Unread count retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to count notifications",
            e,
        )),
    }
}
