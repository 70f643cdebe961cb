use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, login_required};
use crate::config::AppConfig;
use crate::gateway::{GatewayOrder, to_minor_units};
use crate::middlewares::RequireJWT;
use crate::models::payments::{
    entities::GATEWAY_METHOD,
    requests::{CreatePaymentRequest, NewPayment},
    responses::CreatePaymentResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, gateway_from_request, storage_error};

/// 金额必须为正的有限数，支付方式不能为空
pub(crate) fn validate_payment(amount: f64, method: &str) -> Result<(), &'static str> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Amount must be greater than 0");
    }
    if method.trim().is_empty() {
        return Err("Payment method is required");
    }
    Ok(())
}

fn receipt_id(student_id: i64) -> String {
    format!("rcpt_{}_{}", student_id, chrono::Utc::now().timestamp_millis())
}

pub async fn create_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment: CreatePaymentRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_payment(payment.amount, &payment.method) {
        return Ok(bad_request(ErrorCode::PaymentInvalid, msg));
    }
    let method = payment.method.trim().to_lowercase();

    // 1. 在线支付先在网关创建订单，失败则不落库
    let mut order: Option<GatewayOrder> = None;
    let mut key_id: Option<String> = None;
    if method == GATEWAY_METHOD
        && let Some(gateway) = gateway_from_request(request)
    {
        let currency = &AppConfig::get().payment.currency;
        let amount_minor = match to_minor_units(payment.amount, currency) {
            Ok(amount) => amount,
            Err(_) => {
                return Ok(bad_request(
                    ErrorCode::PaymentInvalid,
                    "Amount is too small for the configured currency",
                ));
            }
        };

        match gateway
            .create_order(amount_minor, currency, &receipt_id(student_id))
            .await
        {
            Ok(created) => {
                key_id = Some(gateway.key_id().to_string());
                order = Some(created);
            }
            Err(e) => {
                tracing::error!("Gateway order creation failed: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::PaymentGatewayError,
                        format!("Failed to create payment order: {e}"),
                    )),
                );
            }
        }
    }

    // 2. 写入待支付记录
    let new_payment = NewPayment {
        student_id,
        amount: payment.amount,
        method,
        gateway_order_id: order.as_ref().map(|o| o.id.clone()),
    };

    match storage.create_payment(new_payment).await {
        Ok(created) => {
            tracing::info!(
                "Payment {} created for student {} ({})",
                created.id,
                student_id,
                created.method
            );
            let response = CreatePaymentResponse {
                payment: created,
                order_id: order.as_ref().map(|o| o.id.clone()),
                order_amount: order.as_ref().map(|o| o.amount),
                currency: order.map(|o| o.currency),
                key_id,
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(
                response,
                "Payment created successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::PaymentInvalid,
            "Failed to create payment",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4999.0, "upi", true)]
    #[case(0.0, "upi", false)]
    #[case(-10.0, "cash", false)]
    #[case(f64::INFINITY, "cash", false)]
    #[case(100.0, "  ", false)]
    fn test_validate_payment(#[case] amount: f64, #[case] method: &str, #[case] ok: bool) {
        assert_eq!(validate_payment(amount, method).is_ok(), ok);
    }

    #[test]
    fn test_receipt_id_carries_student() {
        assert!(receipt_id(42).starts_with("rcpt_42_"));
    }
}
