use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::responses::CourseDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to get course",
                e,
            ));
        }
    };

    let batches = match storage.list_batches_by_course(course_id).await {
        Ok(batches) => batches,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to get course batches",
                e,
            ));
        }
    };

    let counts = match storage.count_course_content(course_id).await {
        Ok(counts) => counts,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to count course content",
                e,
            ));
        }
    };

    let response = CourseDetailResponse {
        course,
        batches,
        video_count: counts.videos,
        note_count: counts.notes,
        test_count: counts.tests,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Course retrieved successfully",
    )))
}
