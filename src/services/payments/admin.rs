//! 支付管理（后台）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::payments::{
    entities::PaymentStatus,
    requests::{PaymentListQuery, PaymentQueryParams, UpdatePaymentStatusRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error};

pub(crate) fn parse_payment_status(status: &str) -> Result<PaymentStatus, HttpResponse> {
    status.trim().parse::<PaymentStatus>().map_err(|_| {
        bad_request(
            ErrorCode::PaymentStatusInvalid,
            "Invalid status. Must be one of: success, pending, failed",
        )
    })
}

pub async fn list_payments(
    service: &PaymentService,
    request: &HttpRequest,
    query: PaymentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let status = match query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => match parse_payment_status(raw) {
            Ok(status) => Some(status),
            Err(response) => return Ok(response),
        },
        None => None,
    };

    let list_query = PaymentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: query.student_id,
        status,
    };

    match storage.list_payments_with_pagination(list_query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Payments retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list payments",
            e,
        )),
    }
}

pub async fn payment_stats(
    service: &PaymentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_payment_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Payment statistics retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to get payment statistics",
            e,
        )),
    }
}

pub async fn update_payment_status(
    service: &PaymentService,
    request: &HttpRequest,
    payment_id: i64,
    update: UpdatePaymentStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let status = match parse_payment_status(&update.status) {
        Ok(status) => status,
        Err(response) => return Ok(response),
    };

    match storage.update_payment_status(payment_id, status, None).await {
        Ok(Some(payment)) => {
            tracing::info!("Payment {} marked {}", payment_id, status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                payment,
                "Payment status updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to update payment status",
            e,
        )),
    }
}

pub async fn delete_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_payment(payment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Payment deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to delete payment",
            e,
        )),
    }
}
