use serde::{Deserialize, Serialize};

// 报名状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub const ACTIVE: &'static str = "active";
    pub const COMPLETED: &'static str = "completed";
    pub const DROPPED: &'static str = "dropped";

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => Self::ACTIVE,
            EnrollmentStatus::Completed => Self::COMPLETED,
            EnrollmentStatus::Dropped => Self::DROPPED,
        }
    }
}

impl<'de> Deserialize<'de> for EnrollmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的报名状态: '{s}'. 支持的状态: active, completed, dropped"
            ))
        })
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ACTIVE => Ok(EnrollmentStatus::Active),
            Self::COMPLETED => Ok(EnrollmentStatus::Completed),
            Self::DROPPED => Ok(EnrollmentStatus::Dropped),
            _ => Err(format!("Invalid enrollment status: {s}")),
        }
    }
}

// 报名实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub batch_id: i64,
    pub status: EnrollmentStatus,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
