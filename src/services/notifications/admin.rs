//! 通知管理（后台）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::NotificationService;
use crate::models::notifications::{
    requests::{BroadcastNotificationRequest, NotificationListQuery, SendNotificationRequest},
    responses::SendNotificationResponse,
};
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::{bad_request, not_found, storage_error};
use crate::storage::Storage;

pub(crate) fn validate_notification(title: &str, message: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Title is required");
    }
    if message.trim().is_empty() {
        return Err("Message is required");
    }
    Ok(())
}

async fn ensure_student(storage: &Arc<dyn Storage>, student_id: i64) -> Result<(), HttpResponse> {
    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Err(storage_error(
            ErrorCode::InternalServerError,
            "Failed to get student",
            e,
        )),
    }
}

/// 写入单条通知，student_id 为空即广播
async fn create_single(
    storage: &Arc<dyn Storage>,
    title: &str,
    message: &str,
    student_id: Option<i64>,
) -> HttpResponse {
    if let Some(student_id) = student_id
        && let Err(response) = ensure_student(storage, student_id).await
    {
        return response;
    }

    match storage
        .create_notification(title.trim(), message.trim(), student_id)
        .await
    {
        Ok(notification) => HttpResponse::Created().json(ApiResponse::success(
            notification,
            "Notification sent successfully",
        )),
        Err(e) => storage_error(
            ErrorCode::NotificationInvalid,
            "Failed to send notification",
            e,
        ),
    }
}

pub async fn send_notification(
    service: &NotificationService,
    request: &HttpRequest,
    send: SendNotificationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(msg) = validate_notification(&send.title, &send.message) {
        return Ok(bad_request(ErrorCode::NotificationInvalid, msg));
    }

    if send.student_id.is_some() {
        return Ok(create_single(&storage, &send.title, &send.message, send.student_id).await);
    }

    // 未指定学生时为每个学生各写一条
    match storage
        .create_notification_for_all_students(send.title.trim(), send.message.trim())
        .await
    {
        Ok(sent_count) => {
            tracing::info!("Notification '{}' sent to {} students", send.title, sent_count);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SendNotificationResponse { sent_count },
                "Notification sent successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::NotificationInvalid,
            "Failed to send notification",
            e,
        )),
    }
}

pub async fn broadcast_notification(
    service: &NotificationService,
    request: &HttpRequest,
    broadcast: BroadcastNotificationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(msg) = validate_notification(&broadcast.title, &broadcast.message) {
        return Ok(bad_request(ErrorCode::NotificationInvalid, msg));
    }

    Ok(create_single(&storage, &broadcast.title, &broadcast.message, None).await)
}

pub async fn create_notification(
    service: &NotificationService,
    request: &HttpRequest,
    send: SendNotificationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(msg) = validate_notification(&send.title, &send.message) {
        return Ok(bad_request(ErrorCode::NotificationInvalid, msg));
    }

    Ok(create_single(&storage, &send.title, &send.message, send.student_id).await)
}

pub async fn list_all_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = NotificationListQuery {
        page: Some(query.page),
        size: Some(query.size),
        ..Default::default()
    };

    match storage.list_notifications_with_pagination(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Notifications retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list notifications",
            e,
        )),
    }
}

pub async fn delete_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_notification(notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Notification deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to delete notification",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_notification;

    #[test]
    fn test_validate_notification() {
        assert!(validate_notification("Holiday", "Closed Monday").is_ok());
        assert_eq!(validate_notification(" ", "x"), Err("Title is required"));
        assert_eq!(validate_notification("x", ""), Err("Message is required"));
    }
}
