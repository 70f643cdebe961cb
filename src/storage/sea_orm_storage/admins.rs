//! 后台人员存储操作

use super::SeaOrmStorage;
use crate::entity::admins::{ActiveModel, Column, Entity as Admins};
use crate::errors::{CodeAuraError, Result};
use crate::models::admins::{entities::Admin, requests::NewAdmin};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    pub async fn create_admin_impl(&self, req: NewAdmin) -> Result<Admin> {
        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("创建后台账号失败: {e}")))?;

        Ok(result.into_admin())
    }

    pub async fn get_admin_by_username_impl(&self, username: &str) -> Result<Option<Admin>> {
        let result = Admins::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询后台账号失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    pub async fn count_admins_impl(&self) -> Result<u64> {
        Admins::find()
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计后台账号失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::admins::{entities::AdminRole, requests::NewAdmin};

    #[tokio::test]
    async fn test_create_and_find_admin() {
        let storage = memory_storage().await;
        assert_eq!(storage.count_admins_impl().await.unwrap(), 0);

        storage
            .create_admin_impl(NewAdmin {
                username: "priya".into(),
                email: "priya@codeaura.in".into(),
                password_hash: "h".into(),
                role: AdminRole::Faculty,
            })
            .await
            .unwrap();

        let admin = storage
            .get_admin_by_username_impl("priya")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, AdminRole::Faculty);
        assert_eq!(storage.count_admins_impl().await.unwrap(), 1);
        assert!(
            storage
                .get_admin_by_username_impl("nobody")
                .await
                .unwrap()
                .is_none()
        );
    }
}
