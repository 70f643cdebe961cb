use serde::Deserialize;

use crate::models::common::PaginationQuery;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct CourseQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub duration: Option<String>,
    pub search: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_type: Option<String>,
    pub duration: Option<String>,
    pub search: Option<String>,
}

impl From<CourseQueryParams> for CourseListQuery {
    fn from(params: CourseQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            course_type: params.course_type,
            duration: params.duration,
            search: params.search,
        }
    }
}

// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub course_type: String,
    #[serde(default)]
    pub fee: f64,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub syllabus: Option<String>,
}

// 更新课程请求，缺省字段保持不变
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub fee: Option<f64>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub syllabus: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    pub video_url: String,
    pub duration: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub pdf_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestRequest {
    pub title: String,
    pub questions_json: String,
    pub duration: Option<i32>,
    pub passing_score: Option<i32>,
}
