use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdmissionService;
use crate::middlewares::RequireJWT;
use crate::models::enrollments::requests::EnrollRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error, unauthorized};

pub async fn enroll(
    service: &AdmissionService,
    request: &HttpRequest,
    enroll_request: EnrollRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(unauthorized(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ));
    };
    let storage = service.get_storage(request)?;
    let batch_id = enroll_request.batch_id;

    // 1. 批次必须存在
    match storage.get_batch_by_id(batch_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::BatchNotFound, "Batch not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to enroll",
                e,
            ));
        }
    }

    // 2. 重复报名检查
    match storage.find_enrollment(student_id, batch_id).await {
        Ok(Some(_)) => {
            return Ok(bad_request(
                ErrorCode::AlreadyEnrolled,
                "Already enrolled in this batch",
            ));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to enroll",
                e,
            ));
        }
    }

    // 3. 创建报名
    match storage.create_enrollment(student_id, batch_id).await {
        Ok(enrollment) => {
            tracing::info!("Student {} enrolled in batch {}", student_id, batch_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Enrolled successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to enroll",
            e,
        )),
    }
}
