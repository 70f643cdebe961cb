use serde::{Deserialize, Serialize};

// 学生状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
}

impl StudentStatus {
    pub const ACTIVE: &'static str = "active";
    pub const INACTIVE: &'static str = "inactive";
    pub const GRADUATED: &'static str = "graduated";

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => Self::ACTIVE,
            StudentStatus::Inactive => Self::INACTIVE,
            StudentStatus::Graduated => Self::GRADUATED,
        }
    }
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的学生状态: '{s}'. 支持的状态: active, inactive, graduated"
            ))
        })
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ACTIVE => Ok(StudentStatus::Active),
            Self::INACTIVE => Ok(StudentStatus::Inactive),
            Self::GRADUATED => Ok(StudentStatus::Graduated),
            _ => Err(format!("Invalid student status: {s}")),
        }
    }
}

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub photo_url: Option<String>,
    pub stream: Option<String>,
    pub age: Option<i32>,
    pub status: StudentStatus,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn can_login(&self) -> bool {
        self.status != StudentStatus::Inactive
    }
}

/// 嵌入到报名、支付、通知列表中的精简信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentBrief {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<Student> for StudentBrief {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            phone: s.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip_and_error() {
        assert_eq!(
            "graduated".parse::<StudentStatus>().unwrap(),
            StudentStatus::Graduated
        );
        assert_eq!(StudentStatus::Inactive.to_string(), "inactive");
        let err = serde_json::from_str::<StudentStatus>("\"expelled\"").unwrap_err();
        assert!(err.to_string().contains("expelled"));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let student = Student {
            id: 1,
            name: "Asha".into(),
            phone: "9876543210".into(),
            email: "asha@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            photo_url: None,
            stream: Some("Science".into()),
            age: Some(17),
            status: StudentStatus::Graduated,
            joined_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&student).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["status"], "graduated");
        assert!(student.can_login());
    }
}
