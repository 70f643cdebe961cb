//! 后台人员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_admin(self) -> crate::models::admins::entities::Admin {
        use crate::models::admins::entities::{Admin, AdminRole};

        Admin {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            // 未知角色按权限最小处理
            role: self.role.parse::<AdminRole>().unwrap_or(AdminRole::Counsellor),
            created_at: super::ts(self.created_at),
        }
    }
}
