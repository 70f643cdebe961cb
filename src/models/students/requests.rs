use serde::Deserialize;

use crate::models::common::PaginationQuery;

// 学生更新个人资料
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub stream: Option<String>,
    pub age: Option<i32>,
    pub photo_url: Option<String>,
}

// 修改密码
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// 管理后台学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct StudentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

impl From<StudentQueryParams> for StudentListQuery {
    fn from(params: StudentQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
        }
    }
}

/// 存储层创建学生时使用，密码已哈希
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub stream: Option<String>,
    pub age: Option<i32>,
}
