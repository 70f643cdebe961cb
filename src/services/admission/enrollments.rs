use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AdmissionService;
use crate::middlewares::RequireJWT;
use crate::models::enrollments::{
    entities::{Enrollment, EnrollmentStatus},
    requests::{EnrollmentListQuery, EnrollmentQueryParams, UpdateEnrollmentStatusRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, forbidden, not_found, storage_error, unauthorized};
use crate::storage::Storage;

fn login_required() -> HttpResponse {
    unauthorized(ErrorCode::Unauthorized, "Unauthorized access, please login")
}

pub(crate) fn parse_enrollment_status(status: &str) -> Result<EnrollmentStatus, HttpResponse> {
    status.trim().parse::<EnrollmentStatus>().map_err(|_| {
        bad_request(
            ErrorCode::EnrollmentStatusInvalid,
            "Invalid status. Must be one of: active, completed, dropped",
        )
    })
}

/// 读取报名并校验归属
async fn load_owned_enrollment(
    storage: &Arc<dyn Storage>,
    enrollment_id: i64,
    student_id: i64,
) -> Result<Enrollment, HttpResponse> {
    match storage.get_enrollment_by_id(enrollment_id).await {
        Ok(Some(enrollment)) if enrollment.student_id == student_id => Ok(enrollment),
        Ok(Some(_)) => Err(forbidden("You do not have access to this enrollment")),
        Ok(None) => Err(not_found(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        )),
        Err(e) => Err(storage_error(
            ErrorCode::InternalServerError,
            "Failed to get enrollment",
            e,
        )),
    }
}

pub async fn my_enrollments(
    service: &AdmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    match storage.list_student_enrollments(student_id).await {
        Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollments,
            "Enrollments retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list enrollments",
            e,
        )),
    }
}

pub async fn get_enrollment(
    service: &AdmissionService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    if let Err(response) = load_owned_enrollment(&storage, enrollment_id, student_id).await {
        return Ok(response);
    }

    match storage.get_enrollment_with_batch(enrollment_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Enrollment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to get enrollment",
            e,
        )),
    }
}

pub async fn unenroll(
    service: &AdmissionService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    if let Err(response) = load_owned_enrollment(&storage, enrollment_id, student_id).await {
        return Ok(response);
    }

    match storage.delete_enrollment(enrollment_id).await {
        Ok(true) => {
            tracing::info!("Student {} left enrollment {}", student_id, enrollment_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Unenrolled successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to unenroll",
            e,
        )),
    }
}

pub async fn update_enrollment_status(
    service: &AdmissionService,
    request: &HttpRequest,
    enrollment_id: i64,
    update: UpdateEnrollmentStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let status = match parse_enrollment_status(&update.status) {
        Ok(status) => status,
        Err(response) => return Ok(response),
    };

    match storage.update_enrollment_status(enrollment_id, status).await {
        Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollment,
            "Enrollment status updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to update enrollment status",
            e,
        )),
    }
}

pub async fn list_enrollments(
    service: &AdmissionService,
    request: &HttpRequest,
    query: EnrollmentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let status = match query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => match parse_enrollment_status(raw) {
            Ok(status) => Some(status),
            Err(response) => return Ok(response),
        },
        None => None,
    };

    let list_query = EnrollmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: query.student_id,
        batch_id: query.batch_id,
        status,
    };

    match storage.list_enrollments_with_pagination(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Enrollments retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list enrollments",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("active", Some(EnrollmentStatus::Active))]
    #[case(" dropped ", Some(EnrollmentStatus::Dropped))]
    #[case("completed", Some(EnrollmentStatus::Completed))]
    #[case("paused", None)]
    #[case("", None)]
    fn test_parse_enrollment_status(#[case] raw: &str, #[case] expected: Option<EnrollmentStatus>) {
        assert_eq!(parse_enrollment_status(raw).ok(), expected);
    }
}
