use serde::Serialize;

use super::entities::AdminRole;

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub admin_id: i64,
    pub username: String,
    pub role: AdminRole,
    pub expires_in: u64,
}
