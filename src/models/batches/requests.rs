use serde::Deserialize;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;

// 批次查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct BatchQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
}

// 批次列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct BatchListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
}

impl From<BatchQueryParams> for BatchListQuery {
    fn from(params: BatchQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            course_id: params.course_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBatchRequest {
    pub batch_name: String,
    pub course_id: i64,
    pub timing: Option<String>,
    pub faculty: Option<String>,
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateBatchRequest {
    pub batch_name: Option<String>,
    pub course_id: Option<i64>,
    pub timing: Option<String>,
    pub faculty: Option<String>,
    pub start_date: Option<String>,
}
