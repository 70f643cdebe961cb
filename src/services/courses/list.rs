use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::{CourseListQuery, CourseQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_courses_with_pagination(CourseListQuery::from(query))
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list courses",
            e,
        )),
    }
}
