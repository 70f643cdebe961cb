use serde::Serialize;

use super::entities::Enrollment;
use crate::models::batches::entities::Batch;
use crate::models::courses::entities::CourseBrief;
use crate::models::students::entities::StudentBrief;

/// 学生视角：报名 + 批次 + 课程
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentWithBatch {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub batch: Option<Batch>,
    pub course: Option<CourseBrief>,
}

/// 管理视角：额外带学生信息
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student: Option<StudentBrief>,
    pub batch: Option<Batch>,
    pub course: Option<CourseBrief>,
}
