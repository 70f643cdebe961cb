use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, storage_error};

/// 课程字段校验，更新时缺省字段为 None
pub(super) fn validate_course_fields(
    name: Option<&str>,
    course_type: Option<&str>,
    fee: Option<f64>,
) -> Result<(), &'static str> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err("Course name is required");
    }
    if course_type.is_some_and(|t| t.trim().is_empty()) {
        return Err("Course type is required");
    }
    if fee.is_some_and(|f| !f.is_finite() || f < 0.0) {
        return Err("Fee must be a non-negative number");
    }
    Ok(())
}

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_course_fields(
        Some(&course.name),
        Some(&course.course_type),
        Some(course.fee),
    ) {
        return Ok(bad_request(ErrorCode::CourseInvalid, msg));
    }
    course.name = course.name.trim().to_string();
    course.course_type = course.course_type.trim().to_string();

    match storage.create_course(course).await {
        Ok(course) => {
            tracing::info!("Course {} created", course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                course,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::CourseInvalid,
            "Failed to create course",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_course_fields;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Python"), Some("coding"), Some(4999.0), true)]
    #[case(Some("  "), Some("coding"), Some(4999.0), false)]
    #[case(Some("Python"), Some(""), Some(0.0), false)]
    #[case(Some("Python"), Some("coding"), Some(-1.0), false)]
    #[case(Some("Python"), Some("coding"), Some(f64::NAN), false)]
    #[case(None, None, None, true)]
    fn test_course_fields(
        #[case] name: Option<&str>,
        #[case] course_type: Option<&str>,
        #[case] fee: Option<f64>,
        #[case] ok: bool,
    ) {
        assert_eq!(validate_course_fields(name, course_type, fee).is_ok(), ok);
    }
}
