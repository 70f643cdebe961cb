use serde::Deserialize;

use super::entities::EnrollmentStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub batch_id: i64,
}

/// status 保持字符串，非法值由服务层返回 400
#[derive(Debug, Deserialize)]
pub struct UpdateEnrollmentStatusRequest {
    pub status: String,
}

// 报名查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct EnrollmentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub batch_id: Option<i64>,
    pub status: Option<String>,
}

// 报名列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct EnrollmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub status: Option<EnrollmentStatus>,
}
