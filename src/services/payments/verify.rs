use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, login_required};
use crate::config::AppConfig;
use crate::gateway::{GatewayPayment, to_minor_units};
use crate::middlewares::RequireJWT;
use crate::models::payments::{entities::PaymentStatus, requests::VerifyPaymentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, gateway_from_request, not_found, storage_error};

/// 网关支付结果对应的本地状态，None 表示尚无结论
///
/// `expected_amount` 为本地记录金额换算后的最小货币单位。
pub(crate) fn resolve_status(
    payment: &GatewayPayment,
    order_id: &str,
    expected_amount: i64,
) -> Option<PaymentStatus> {
    // 支付号必须属于这笔订单，且金额一致
    if payment.order_id.as_deref() != Some(order_id) || payment.amount != expected_amount {
        return None;
    }
    if payment.is_captured() {
        Some(PaymentStatus::Success)
    } else if payment.is_failed() {
        Some(PaymentStatus::Failed)
    } else {
        None
    }
}

fn verification_failed() -> HttpResponse {
    bad_request(
        ErrorCode::PaymentVerificationFailed,
        "Payment verification failed",
    )
}

pub async fn verify_payment(
    service: &PaymentService,
    request: &HttpRequest,
    verify: VerifyPaymentRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_id) = RequireJWT::extract_student_id(request) else {
        return Ok(login_required());
    };
    let storage = service.get_storage(request)?;

    let payment_id = verify.payment_id.trim();
    let order_id = verify.order_id.trim();
    if payment_id.is_empty() || order_id.is_empty() {
        return Ok(bad_request(
            ErrorCode::PaymentInvalid,
            "Payment ID and Order ID are required",
        ));
    }

    // 1. 按订单号找到本人的支付记录
    let payment = match storage
        .get_student_payment_by_order(student_id, order_id)
        .await
    {
        Ok(Some(payment)) => payment,
        Ok(None) => return Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to verify payment",
                e,
            ));
        }
    };

    // 2. 向网关查询支付结果
    let Some(gateway) = gateway_from_request(request) else {
        return Ok(verification_failed());
    };
    let gateway_payment = match gateway.fetch_payment(payment_id).await {
        Ok(gateway_payment) => gateway_payment,
        Err(e) => {
            tracing::warn!("Gateway lookup for {} failed: {}", payment_id, e);
            return Ok(verification_failed());
        }
    };

    let Ok(expected_amount) = to_minor_units(payment.amount, &AppConfig::get().payment.currency)
    else {
        return Ok(verification_failed());
    };
    let Some(status) = resolve_status(&gateway_payment, order_id, expected_amount) else {
        tracing::warn!(
            "Gateway payment {} does not match order {} (amount {} vs {})",
            gateway_payment.id,
            order_id,
            gateway_payment.amount,
            expected_amount
        );
        return Ok(verification_failed());
    };

    // 3. 写回状态
    let updated = match storage
        .update_payment_status(payment.id, status, Some(gateway_payment.id.clone()))
        .await
    {
        Ok(Some(updated)) => updated,
        Ok(None) => return Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to verify payment",
                e,
            ));
        }
    };

    match status {
        PaymentStatus::Success => {
            tracing::info!("Payment {} verified", updated.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Payment verified successfully",
            )))
        }
        _ => Ok(bad_request(
            ErrorCode::PaymentVerificationFailed,
            "Payment failed",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway_payment(status: &str, order_id: Option<&str>) -> GatewayPayment {
        GatewayPayment {
            id: "pay_1".into(),
            status: status.into(),
            order_id: order_id.map(str::to_string),
            amount: 499_900,
        }
    }

    #[test]
    fn test_resolve_status() {
        assert_eq!(
            resolve_status(&gateway_payment("captured", Some("order_1")), "order_1", 499_900),
            Some(PaymentStatus::Success)
        );
        assert_eq!(
            resolve_status(&gateway_payment("failed", Some("order_1")), "order_1", 499_900),
            Some(PaymentStatus::Failed)
        );
        assert_eq!(
            resolve_status(&gateway_payment("authorized", Some("order_1")), "order_1", 499_900),
            None
        );
        // 其他订单的支付号
        assert_eq!(
            resolve_status(&gateway_payment("captured", Some("order_2")), "order_1", 499_900),
            None
        );
    }

    #[test]
    fn test_resolve_status_requires_order_and_amount() {
        // 未绑定订单的支付
        assert_eq!(
            resolve_status(&gateway_payment("captured", None), "order_1", 499_900),
            None
        );
        // 金额不符
        assert_eq!(
            resolve_status(&gateway_payment("captured", Some("order_1")), "order_1", 100),
            None
        );
    }
}
