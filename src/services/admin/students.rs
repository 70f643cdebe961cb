use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::middlewares::RequireJWT;
use crate::models::students::{
    requests::{StudentListQuery, StudentQueryParams},
    responses::StudentDetailResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error};

pub async fn list_students(
    service: &AdminService,
    request: &HttpRequest,
    query: StudentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_students_with_pagination(StudentListQuery::from(query))
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list students",
            e,
        )),
    }
}

/// 学生详情，附带报名与支付记录
pub async fn get_student(
    service: &AdminService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to get student",
                e,
            ));
        }
    };

    let enrollments = match storage.list_student_enrollments(student_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to get student enrollments",
                e,
            ));
        }
    };

    let payments = match storage.list_student_payments(student_id).await {
        Ok(payments) => payments,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to get student payments",
                e,
            ));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDetailResponse {
            student,
            enrollments,
            payments,
        },
        "Student retrieved successfully",
    )))
}

pub async fn delete_student(
    service: &AdminService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_student(student_id).await {
        Ok(true) => {
            RequireJWT::invalidate_student(request, student_id).await;
            tracing::info!("Student {} deleted", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Student deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to delete student",
            e,
        )),
    }
}
