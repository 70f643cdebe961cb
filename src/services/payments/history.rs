use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, login_required};
use crate::middlewares::RequireJWT;
use crate::models::payments::requests::PaymentListQuery;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::{forbidden, not_found, storage_error};

pub async fn payment_history(
    service: &PaymentService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    let list_query = PaymentListQuery {
        page: Some(query.page),
        size: Some(query.size),
        student_id: Some(student_id),
        status: None,
    };

    match storage.list_payments_with_pagination(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page.map(|p| p.payment),
            "Payment history retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list payments",
            e,
        )),
    }
}

pub async fn get_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    match storage.get_payment_by_id(payment_id).await {
        Ok(Some(payment)) if payment.student_id == student_id => Ok(HttpResponse::Ok().json(
            ApiResponse::success(payment, "Payment retrieved successfully"),
        )),
        Ok(Some(_)) => Ok(forbidden("You do not have access to this payment")),
        Ok(None) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to get payment",
            e,
        )),
    }
}
