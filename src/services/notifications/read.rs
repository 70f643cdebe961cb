use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{NotificationService, login_required};
use crate::middlewares::RequireJWT;
use crate::models::notifications::{entities::Notification, responses::MarkAllReadResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{forbidden, not_found, storage_error};
use crate::storage::Storage;

/// 读取学生可见的通知，发给他人的返回 403
async fn load_visible(
    storage: &Arc<dyn Storage>,
    notification_id: i64,
    student_id: i64,
) -> Result<Notification, HttpResponse> {
    match storage.get_notification_by_id(notification_id).await {
        Ok(Some(notification)) if notification.visible_to(student_id) => Ok(notification),
        Ok(Some(_)) => Err(forbidden("You do not have access to this notification")),
        Ok(None) => Err(not_found(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )),
        Err(e) => Err(storage_error(
            ErrorCode::InternalServerError,
            "Failed to get notification",
            e,
        )),
    }
}

pub async fn get_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    match load_visible(&storage, notification_id, student_id).await {
        Ok(notification) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notification,
            "Notification retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}

pub async fn mark_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    let mut notification = match load_visible(&storage, notification_id, student_id).await {
        Ok(notification) => notification,
        Err(response) => return Ok(response),
    };

    match storage.mark_notification_read(notification_id).await {
        Ok(true) => {
            notification.is_read = true;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                notification,
                "Notification marked as read",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to mark notification as read",
            e,
        )),
    }
}

pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    match storage.mark_all_notifications_read(student_id).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "All notifications marked as read",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to mark notifications as read",
            e,
        )),
    }
}

/// 学生只能删除发给自己的通知，广播不可删除
pub async fn delete_own_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    match storage.get_notification_by_id(notification_id).await {
        Ok(Some(notification)) if notification.student_id == Some(student_id) => {}
        Ok(Some(notification)) if notification.is_broadcast() => {
            return Ok(forbidden("Broadcast notifications cannot be deleted"));
        }
        Ok(Some(_)) => return Ok(forbidden("You do not have access to this notification")),
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::NotificationNotFound,
                "Notification not found",
            ));
        }
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to delete notification",
                e,
            ));
        }
    }

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
