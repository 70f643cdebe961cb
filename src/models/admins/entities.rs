use serde::{Deserialize, Serialize};

// 后台人员角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,      // 管理员
    Faculty,    // 授课老师
    Counsellor, // 招生顾问
}

impl AdminRole {
    pub const ADMIN: &'static str = "admin";
    pub const FACULTY: &'static str = "faculty";
    pub const COUNSELLOR: &'static str = "counsellor";

    /// 仅管理员
    pub fn admin_roles() -> &'static [&'static AdminRole] {
        &[&Self::Admin]
    }

    /// 所有后台人员
    pub fn staff_roles() -> &'static [&'static AdminRole] {
        &[&Self::Admin, &Self::Faculty, &Self::Counsellor]
    }
}

impl<'de> Deserialize<'de> for AdminRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的后台角色: '{s}'. 支持的角色: admin, faculty, counsellor"
            ))
        })
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::Admin => write!(f, "{}", AdminRole::ADMIN),
            AdminRole::Faculty => write!(f, "{}", AdminRole::FACULTY),
            AdminRole::Counsellor => write!(f, "{}", AdminRole::COUNSELLOR),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ADMIN => Ok(AdminRole::Admin),
            Self::FACULTY => Ok(AdminRole::Faculty),
            Self::COUNSELLOR => Ok(AdminRole::Counsellor),
            _ => Err(format!("Invalid admin role: {s}")),
        }
    }
}

// 后台人员实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 缓存中保存的后台会话
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminSession {
    pub admin_id: i64,
    pub username: String,
    pub role: AdminRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Admin> for AdminSession {
    fn from(admin: &Admin) -> Self {
        Self {
            admin_id: admin.id,
            username: admin.username.clone(),
            role: admin.role,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_groups() {
        assert!(AdminRole::staff_roles().contains(&&AdminRole::Counsellor));
        assert!(!AdminRole::admin_roles().contains(&&AdminRole::Faculty));
    }

    #[test]
    fn test_session_roundtrip_through_cache_json() {
        let session = AdminSession {
            admin_id: 2,
            username: "faculty1".into(),
            role: AdminRole::Faculty,
            created_at: chrono::Utc::now(),
        };
        let raw = serde_json::to_string(&session).unwrap();
        assert!(raw.contains("\"faculty\""));
        let back: AdminSession = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, session);
    }
}
