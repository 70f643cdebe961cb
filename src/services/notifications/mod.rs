pub mod admin;
pub mod list;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::{
    BroadcastNotificationRequest, NotificationQueryParams, SendNotificationRequest,
};
use crate::models::{ErrorCode, PaginationQuery};
use crate::services::unauthorized;
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

pub(crate) fn login_required() -> HttpResponse {
    unauthorized(ErrorCode::Unauthorized, "Unauthorized access, please login")
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        query: NotificationQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, query).await
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::unread_count(self, request).await
    }

    pub async fn get_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::get_notification(self, request, notification_id).await
    }

    pub async fn mark_read(&self, request: &HttpRequest, notification_id: i64) -> ActixResult<HttpResponse> {
        read::mark_read(self, request, notification_id).await
    }

    pub async fn mark_all_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        read::mark_all_read(self, request).await
    }

    pub async fn delete_own_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::delete_own_notification(self, request, notification_id).await
    }

    // 后台发送：指定学生或逐个发送给所有学生
    pub async fn send_notification(
        &self,
        request: &HttpRequest,
        send: SendNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        admin::send_notification(self, request, send).await
    }

    // 后台广播：一条 student_id 为空的记录
    pub async fn broadcast_notification(
        &self,
        request: &HttpRequest,
        broadcast: BroadcastNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        admin::broadcast_notification(self, request, broadcast).await
    }

    // 管理后台页面创建：student_id 为空即广播
    pub async fn create_notification(
        &self,
        request: &HttpRequest,
        send: SendNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        admin::create_notification(self, request, send).await
    }

    pub async fn list_all_notifications(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        admin::list_all_notifications(self, request, query).await
    }

    pub async fn delete_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        admin::delete_notification(self, request, notification_id).await
    }
}
