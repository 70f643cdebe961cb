//! 在线支付网关
//!
//! 应用只需要两个调用：创建订单和查询支付结果。

pub mod razorpay;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{CodeAuraError, Result};

pub use razorpay::RazorpayGateway;

/// 网关侧已捕获的支付状态
pub const PAYMENT_CAPTURED: &str = "captured";
/// 网关侧失败的支付状态
pub const PAYMENT_FAILED: &str = "failed";

/// 网关订单
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayOrder {
    pub id: String,
    /// 最小货币单位
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// 网关支付
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayPayment {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: i64,
}

impl GatewayPayment {
    pub fn is_captured(&self) -> bool {
        self.status == PAYMENT_CAPTURED
    }

    pub fn is_failed(&self) -> bool {
        self.status == PAYMENT_FAILED
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// 创建订单，金额为最小货币单位
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder>;

    /// 查询支付
    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment>;

    /// 前端发起支付所需的公开 key
    fn key_id(&self) -> &str;
}

/// 没有小数位的货币
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "VND", "CLP", "PYG", "UGX"];

/// 金额换算为最小货币单位（INR 为 paise）
pub fn to_minor_units(amount: f64, currency: &str) -> Result<i64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CodeAuraError::validation(format!("无效的支付金额: {amount}")));
    }

    let factor = if ZERO_DECIMAL_CURRENCIES.contains(&currency.to_ascii_uppercase().as_str()) {
        1.0
    } else {
        100.0
    };

    let minor = (amount * factor).round();
    if minor < 1.0 || minor > i64::MAX as f64 {
        return Err(CodeAuraError::validation(format!("无效的支付金额: {amount}")));
    }
    Ok(minor as i64)
}

/// 按配置创建网关，未配置密钥时返回 None
pub fn create_gateway() -> Result<Option<Arc<dyn PaymentGateway>>> {
    let config = &AppConfig::get().payment;
    if !config.gateway_enabled() {
        return Ok(None);
    }
    Ok(Some(Arc::new(RazorpayGateway::from_config(config)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4999.0, "INR", 499_900)]
    #[case(0.01, "INR", 1)]
    #[case(250.5, "INR", 25_050)]
    #[case(1500.0, "JPY", 1500)]
    #[case(1500.4, "jpy", 1500)]
    fn test_to_minor_units(#[case] amount: f64, #[case] currency: &str, #[case] expected: i64) {
        assert_eq!(to_minor_units(amount, currency).unwrap(), expected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(0.001)]
    fn test_to_minor_units_rejects(#[case] amount: f64) {
        assert!(to_minor_units(amount, "INR").is_err());
    }

    #[test]
    fn test_payment_state() {
        let payment: GatewayPayment =
            serde_json::from_str(r#"{"id":"pay_1","status":"captured","order_id":"order_1"}"#)
                .unwrap();
        assert!(payment.is_captured());
        assert!(!payment.is_failed());
        assert_eq!(payment.amount, 0);
    }
}
