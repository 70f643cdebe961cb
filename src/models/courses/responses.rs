use serde::Serialize;

use super::entities::Course;
use crate::models::batches::entities::Batch;

// 课程详情
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: Course,
    pub batches: Vec<Batch>,
    pub video_count: u64,
    pub note_count: u64,
    pub test_count: u64,
}

/// 课程下各类内容数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseContentCounts {
    pub videos: u64,
    pub notes: u64,
    pub tests: u64,
}
