use serde::Serialize;

use super::entities::Payment;
use crate::models::students::entities::StudentBrief;

// 创建支付响应，网关订单信息仅在线支付时出现
#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    #[serde(flatten)]
    pub payment: Payment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentWithStudent {
    #[serde(flatten)]
    pub payment: Payment,
    pub student: Option<StudentBrief>,
}

// 支付统计
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PaymentStats {
    pub total_payments: u64,
    pub total_amount: f64,
    pub successful_payments: u64,
    pub pending_payments: u64,
    pub failed_payments: u64,
}
