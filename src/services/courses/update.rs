use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use super::create::validate_course_fields;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    mut update: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_course_fields(
        update.name.as_deref(),
        update.course_type.as_deref(),
        update.fee,
    ) {
        return Ok(bad_request(ErrorCode::CourseInvalid, msg));
    }
    update.name = update.name.map(|n| n.trim().to_string());
    update.course_type = update.course_type.map(|t| t.trim().to_string());

    match storage.update_course(course_id, update).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::CourseInvalid,
            "Failed to update course",
            e,
        )),
    }
}
