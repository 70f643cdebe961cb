use serde::{Deserialize, Serialize};

// 通知实体，student_id 为空表示广播
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub student_id: Option<i64>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Notification {
    pub fn is_broadcast(&self) -> bool {
        self.student_id.is_none()
    }

    /// 学生能否查看：发给自己或广播
    pub fn visible_to(&self, student_id: i64) -> bool {
        self.student_id.is_none_or(|id| id == student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(student_id: Option<i64>) -> Notification {
        Notification {
            id: 1,
            title: "Batch update".into(),
            message: "Class moved to 6pm".into(),
            student_id,
            is_read: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_visibility() {
        assert!(notification(None).visible_to(5));
        assert!(notification(Some(5)).visible_to(5));
        assert!(!notification(Some(6)).visible_to(5));
        assert!(notification(None).is_broadcast());
    }
}
