//! 批次存储操作

use super::SeaOrmStorage;
use crate::entity::batches::{ActiveModel, Column, Entity as Batches};
use crate::entity::prelude::Courses;
use crate::errors::{CodeAuraError, Result};
use crate::models::{
    batches::{
        entities::{Batch, BatchWithCourse},
        requests::{BatchListQuery, CreateBatchRequest, UpdateBatchRequest},
    },
    common::{PaginatedResponse, PaginationInfo, pagination::normalize_page},
    courses::entities::CourseBrief,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_batch_impl(&self, req: CreateBatchRequest) -> Result<Batch> {
        let model = ActiveModel {
            batch_name: Set(req.batch_name),
            course_id: Set(req.course_id),
            timing: Set(req.timing),
            faculty: Set(req.faculty),
            start_date: Set(req.start_date),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("创建批次失败: {e}")))?;

        Ok(result.into_batch())
    }

    pub async fn get_batch_by_id_impl(&self, id: i64) -> Result<Option<Batch>> {
        let result = Batches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询批次失败: {e}")))?;

        Ok(result.map(|m| m.into_batch()))
    }

    pub async fn list_batches_by_course_impl(&self, course_id: i64) -> Result<Vec<Batch>> {
        let result = Batches::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询批次失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_batch()).collect())
    }

    /// 分页列出批次并附带所属课程
    pub async fn list_batches_with_pagination_impl(
        &self,
        query: BatchListQuery,
    ) -> Result<PaginatedResponse<BatchWithCourse>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Batches::find().find_also_related(Courses);

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询批次总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询批次页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询批次列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows
                .into_iter()
                .map(|(batch, course)| BatchWithCourse {
                    batch: batch.into_batch(),
                    course: course.map(|c| CourseBrief::from(c.into_course())),
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_batch_impl(
        &self,
        id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>> {
        let Some(existing) = Batches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询批次失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();

        if let Some(batch_name) = update.batch_name {
            model.batch_name = Set(batch_name);
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(timing) = update.timing {
            model.timing = Set(Some(timing));
        }
        if let Some(faculty) = update.faculty {
            model.faculty = Set(Some(faculty));
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(Some(start_date));
        }

        if !model.is_changed() {
            return Ok(Some(existing.into_batch()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("更新批次失败: {e}")))?;

        Ok(Some(updated.into_batch()))
    }

    pub async fn delete_batch_impl(&self, id: i64) -> Result<bool> {
        let result = Batches::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("删除批次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::batches::requests::{BatchListQuery, UpdateBatchRequest};

    #[tokio::test]
    async fn test_list_filters_by_course_and_embeds_course() {
        let storage = memory_storage().await;
        let python = seed_course(&storage, "Python Basics").await;
        let rust = seed_course(&storage, "Rust Systems").await;
        seed_batch(&storage, python.id, "Morning").await;
        seed_batch(&storage, python.id, "Evening").await;
        seed_batch(&storage, rust.id, "Weekend").await;

        let page = storage
            .list_batches_with_pagination_impl(BatchListQuery {
                course_id: Some(python.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert!(page.items.iter().all(|b| b.batch.course_id == python.id));
        assert_eq!(
            page.items[0].course.as_ref().map(|c| c.name.as_str()),
            Some("Python Basics")
        );
    }

    #[tokio::test]
    async fn test_update_batch() {
        let storage = memory_storage().await;
        let course = seed_course(&storage, "Python Basics").await;
        let batch = seed_batch(&storage, course.id, "Morning").await;

        let updated = storage
            .update_batch_impl(
                batch.id,
                UpdateBatchRequest {
                    faculty: Some("R. Menon".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.faculty.as_deref(), Some("R. Menon"));
        assert_eq!(updated.batch_name, "Morning");
        assert!(
            storage
                .update_batch_impl(999, UpdateBatchRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
