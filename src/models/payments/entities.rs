use serde::{Deserialize, Serialize};

// 支付状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub const PENDING: &'static str = "pending";
    pub const SUCCESS: &'static str = "success";
    pub const FAILED: &'static str = "failed";

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => Self::PENDING,
            PaymentStatus::Success => Self::SUCCESS,
            PaymentStatus::Failed => Self::FAILED,
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的支付状态: '{s}'. 支持的状态: pending, success, failed"
            ))
        })
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(PaymentStatus::Pending),
            Self::SUCCESS => Ok(PaymentStatus::Success),
            Self::FAILED => Ok(PaymentStatus::Failed),
            _ => Err(format!("Invalid payment status: {s}")),
        }
    }
}

// 支付实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub receipt_url: Option<String>,
    pub paid_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 走在线网关的支付方式
pub const GATEWAY_METHOD: &str = "razorpay";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "success".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Success
        );
        assert!("refunded".parse::<PaymentStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
