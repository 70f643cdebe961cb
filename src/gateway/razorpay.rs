//! Razorpay 风格的 HTTPS 网关客户端

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{GatewayOrder, GatewayPayment, PaymentGateway};
use crate::config::PaymentConfig;
use crate::errors::{CodeAuraError, Result};

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

pub struct RazorpayGateway {
    client: Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(base_url: &str, key_id: &str, key_secret: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodeAuraError::gateway(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
        })
    }

    pub fn from_config(config: &PaymentConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.key_id,
            &config.key_secret,
            Duration::from_secs(config.timeout.max(1)),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 支付号作为单独的路径段写入，`/`、`..` 等字符会被转义
    fn payment_url(&self, payment_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url("payments"))
            .map_err(|e| CodeAuraError::gateway(format!("无效的网关地址: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| CodeAuraError::gateway("网关地址不能作为基础路径"))?
            .push(payment_id);
        Ok(url)
    }

    /// 非 2xx 响应转换为网关错误
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<GatewayErrorBody>(&body)
            .map(|b| format!("{} {}", b.error.code, b.error.description))
            .unwrap_or(body);
        warn!("Payment gateway {} failed with {}: {}", action, status, detail);
        Err(CodeAuraError::gateway(format!(
            "{action} failed ({status}): {}",
            detail.trim()
        )))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder> {
        debug!(
            "Creating gateway order: amount={} {} receipt={}",
            amount_minor, currency, receipt
        );

        let response = self
            .client
            .post(self.url("orders"))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&CreateOrderBody {
                amount: amount_minor,
                currency,
                receipt,
            })
            .send()
            .await?;

        Self::read_json(response, "create order").await
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment> {
        let response = self
            .client
            .get(self.payment_url(payment_id)?)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await?;

        Self::read_json(response, "fetch payment").await
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let gateway = RazorpayGateway::new(
            "https://api.razorpay.com/v1/",
            "rzp_test",
            "secret",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            gateway.url("/payments/pay_1"),
            "https://api.razorpay.com/v1/payments/pay_1"
        );
        assert_eq!(gateway.key_id(), "rzp_test");
    }

    #[test]
    fn test_payment_id_is_single_segment() {
        let gateway = RazorpayGateway::new(
            "https://api.razorpay.com/v1",
            "rzp_test",
            "secret",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            gateway.payment_url("pay_Abc123").unwrap().as_str(),
            "https://api.razorpay.com/v1/payments/pay_Abc123"
        );
        let escaped = gateway.payment_url("../orders/order_1").unwrap();
        assert_eq!(
            escaped.as_str(),
            "https://api.razorpay.com/v1/payments/..%2Forders%2Forder_1"
        );
        assert_eq!(escaped.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_order_body_shape() {
        let body = serde_json::to_value(CreateOrderBody {
            amount: 499_900,
            currency: "INR",
            receipt: "rcpt_1_1700000000",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"amount": 499900, "currency": "INR", "receipt": "rcpt_1_1700000000"})
        );
    }
}
