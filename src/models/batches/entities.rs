use serde::{Deserialize, Serialize};

use crate::models::courses::entities::CourseBrief;

// 批次实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub batch_name: String,
    pub course_id: i64,
    pub timing: Option<String>,
    pub faculty: Option<String>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 带课程信息的批次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchWithCourse {
    #[serde(flatten)]
    pub batch: Batch,
    pub course: Option<CourseBrief>,
}
