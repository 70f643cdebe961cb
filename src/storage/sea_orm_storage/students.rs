//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{CodeAuraError, Result};
use crate::models::{
    common::{PaginatedResponse, PaginationInfo, pagination::normalize_page},
    students::{
        entities::{Student, StudentStatus},
        requests::{NewStudent, StudentListQuery, UpdateProfileRequest},
    },
};
use crate::utils::sql::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建学生，唯一约束冲突返回 Conflict
    pub async fn create_student_impl(&self, req: NewStudent) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            phone: Set(req.phone),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            photo_url: Set(None),
            stream: Set(req.stream),
            age: Set(req.age),
            status: Set(StudentStatus::Active.to_string()),
            joined_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                CodeAuraError::conflict(format!("学生已存在: {detail}"))
            }
            _ => CodeAuraError::database_operation(format!("创建学生失败: {e}")),
        })?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_phone_impl(&self, phone: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生，最新加入在前
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Students::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search)))
                    .add(Column::Phone.like(contains_pattern(search))),
            );
        }

        let paginator = select
            .order_by_desc(Column::JoinedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询学生页数失败: {e}")))?;
        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新个人资料，只写入提供的字段
    pub async fn update_student_profile_impl(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(stream) = update.stream {
            model.stream = Set(Some(stream));
        }
        if let Some(age) = update.age {
            model.age = Set(Some(age));
        }
        if let Some(photo_url) = update.photo_url {
            model.photo_url = Set(Some(photo_url));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(updated.into_student()))
    }

    pub async fn update_student_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(
                Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("更新密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::errors::CodeAuraError;
    use crate::models::students::requests::{StudentListQuery, UpdateProfileRequest};

    #[tokio::test]
    async fn test_unique_phone_is_conflict() {
        let storage = memory_storage().await;
        seed_student(&storage, "9000000001").await;

        let err = storage
            .create_student_impl(crate::models::students::requests::NewStudent {
                name: "Dup".into(),
                phone: "9000000001".into(),
                email: "other@example.com".into(),
                password_hash: "h".into(),
                stream: None,
                age: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CodeAuraError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_search_matches_name_email_phone() {
        let storage = memory_storage().await;
        seed_student(&storage, "9000000001").await;
        seed_student(&storage, "9111111111").await;

        let by_phone = storage
            .list_students_with_pagination_impl(StudentListQuery {
                search: Some("91111".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_phone.pagination.total, 1);
        assert_eq!(by_phone.items[0].phone, "9111111111");

        let all = storage
            .list_students_with_pagination_impl(StudentListQuery {
                search: Some("example.com".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);
    }

    #[tokio::test]
    async fn test_partial_profile_update() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "9000000001").await;

        let updated = storage
            .update_student_profile_impl(
                student.id,
                UpdateProfileRequest {
                    stream: Some("Commerce".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.stream.as_deref(), Some("Commerce"));
        assert_eq!(updated.name, student.name);

        assert!(
            storage
                .update_student_profile_impl(9999, UpdateProfileRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
