use serde::Deserialize;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;

// 学生通知列表查询参数
#[derive(Debug, Deserialize)]
pub struct NotificationQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub unread_only: Option<bool>,
}

// 通知列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct NotificationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 设置时返回该学生的通知及广播，否则返回全部
    pub student_id: Option<i64>,
    pub unread_only: bool,
}

/// student_id 缺省时发送给所有学生
#[derive(Debug, Clone, Deserialize)]
pub struct SendNotificationRequest {
    pub title: String,
    pub message: String,
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastNotificationRequest {
    pub title: String,
    pub message: String,
}
