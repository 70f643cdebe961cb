use serde::Deserialize;

use super::entities::PaymentStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: f64,
    #[serde(default)]
    pub method: String,
}

/// payment_id 为网关返回的支付号，order_id 为创建时的网关订单号
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub payment_id: String,
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: String,
}

// 支付查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct PaymentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub status: Option<String>,
}

// 支付列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct PaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<PaymentStatus>,
}

/// 存储层新建支付记录
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub student_id: i64,
    pub amount: f64,
    pub method: String,
    pub gateway_order_id: Option<String>,
}
