use serde::Serialize;

use super::entities::Notification;
use crate::models::students::entities::StudentBrief;

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_count: u64,
}

#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub sent_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationWithStudent {
    #[serde(flatten)]
    pub notification: Notification,
    pub student: Option<StudentBrief>,
}
