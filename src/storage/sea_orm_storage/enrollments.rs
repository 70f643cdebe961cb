//! 报名存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::prelude::{Batches, Courses, Students};
use crate::entity::{batches, courses, students};
use crate::errors::{CodeAuraError, Result};
use crate::models::{
    batches::entities::Batch,
    common::{PaginatedResponse, PaginationInfo, pagination::normalize_page},
    courses::entities::CourseBrief,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::EnrollmentListQuery,
        responses::{EnrollmentDetail, EnrollmentWithBatch},
    },
    students::entities::StudentBrief,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// 批量加载的关联数据
#[derive(Default)]
struct Related {
    students: HashMap<i64, StudentBrief>,
    batches: HashMap<i64, Batch>,
    courses: HashMap<i64, CourseBrief>,
}

impl Related {
    fn batch_and_course(&self, batch_id: i64) -> (Option<Batch>, Option<CourseBrief>) {
        let batch = self.batches.get(&batch_id).cloned();
        let course = batch
            .as_ref()
            .and_then(|b| self.courses.get(&b.course_id).cloned());
        (batch, course)
    }
}

impl SeaOrmStorage {
    /// 按报名记录批量查询学生、批次、课程，避免逐条查询
    async fn load_enrollment_related(
        &self,
        rows: &[Model],
        with_students: bool,
    ) -> Result<Related> {
        let mut related = Related::default();
        if rows.is_empty() {
            return Ok(related);
        }

        let batch_ids: Vec<i64> = rows.iter().map(|e| e.batch_id).collect();
        let batch_models = Batches::find()
            .filter(batches::Column::Id.is_in(batch_ids))
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询批次失败: {e}")))?;

        let course_ids: Vec<i64> = batch_models.iter().map(|b| b.course_id).collect();
        if !course_ids.is_empty() {
            let course_models = Courses::find()
                .filter(courses::Column::Id.is_in(course_ids))
                .all(&self.db)
                .await
                .map_err(|e| CodeAuraError::database_operation(format!("查询课程失败: {e}")))?;
            related.courses = course_models
                .into_iter()
                .map(|c| (c.id, CourseBrief::from(c.into_course())))
                .collect();
        }
        related.batches = batch_models
            .into_iter()
            .map(|b| (b.id, b.into_batch()))
            .collect();

        if with_students {
            let student_ids: Vec<i64> = rows.iter().map(|e| e.student_id).collect();
            let student_models = Students::find()
                .filter(students::Column::Id.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(|e| CodeAuraError::database_operation(format!("查询学生失败: {e}")))?;
            related.students = student_models
                .into_iter()
                .map(|s| (s.id, StudentBrief::from(s.into_student())))
                .collect();
        }

        Ok(related)
    }

    fn with_batch(related: &Related, row: Model) -> EnrollmentWithBatch {
        let (batch, course) = related.batch_and_course(row.batch_id);
        EnrollmentWithBatch {
            enrollment: row.into_enrollment(),
            batch,
            course,
        }
    }

    pub(super) async fn enrollment_details(&self, rows: Vec<Model>) -> Result<Vec<EnrollmentDetail>> {
        let related = self.load_enrollment_related(&rows, true).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let (batch, course) = related.batch_and_course(row.batch_id);
                EnrollmentDetail {
                    student: related.students.get(&row.student_id).cloned(),
                    enrollment: row.into_enrollment(),
                    batch,
                    course,
                }
            })
            .collect())
    }

    pub async fn create_enrollment_impl(&self, student_id: i64, batch_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            batch_id: Set(batch_id),
            status: Set(EnrollmentStatus::Active.to_string()),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("创建报名失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    pub async fn get_enrollment_by_id_impl(&self, id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询报名失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn get_enrollment_with_batch_impl(
        &self,
        id: i64,
    ) -> Result<Option<EnrollmentWithBatch>> {
        let Some(row) = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询报名失败: {e}")))?
        else {
            return Ok(None);
        };

        let rows = vec![row];
        let related = self.load_enrollment_related(&rows, false).await?;
        Ok(rows.into_iter().next().map(|row| Self::with_batch(&related, row)))
    }

    pub async fn find_enrollment_impl(
        &self,
        student_id: i64,
        batch_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::BatchId.eq(batch_id))
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询报名失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn list_student_enrollments_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EnrollmentWithBatch>> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询报名失败: {e}")))?;

        let related = self.load_enrollment_related(&rows, false).await?;
        Ok(rows
            .into_iter()
            .map(|row| Self::with_batch(&related, row))
            .collect())
    }

    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<EnrollmentDetail>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Enrollments::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(batch_id) = query.batch_id {
            select = select.filter(Column::BatchId.eq(batch_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let paginator = select
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询报名总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询报名页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询报名列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: self.enrollment_details(rows).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_enrollment_status_impl(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        if self.get_enrollment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("更新报名状态失败: {e}")))?;

        Ok(Some(updated.into_enrollment()))
    }

    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("删除报名失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::enrollments::{entities::EnrollmentStatus, requests::EnrollmentListQuery};

    #[tokio::test]
    async fn test_enrollment_lifecycle_with_embeds() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "9000000001").await;
        let course = seed_course(&storage, "Python Basics").await;
        let batch = seed_batch(&storage, course.id, "Morning").await;

        assert!(
            storage
                .find_enrollment_impl(student.id, batch.id)
                .await
                .unwrap()
                .is_none()
        );
        let enrollment = storage
            .create_enrollment_impl(student.id, batch.id)
            .await
            .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert!(
            storage
                .find_enrollment_impl(student.id, batch.id)
                .await
                .unwrap()
                .is_some()
        );

        let mine = storage.list_student_enrollments_impl(student.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].batch.as_ref().unwrap().batch_name, "Morning");
        assert_eq!(mine[0].course.as_ref().unwrap().name, "Python Basics");

        storage
            .update_enrollment_status_impl(enrollment.id, EnrollmentStatus::Completed)
            .await
            .unwrap();

        let completed = storage
            .list_enrollments_with_pagination_impl(EnrollmentListQuery {
                status: Some(EnrollmentStatus::Completed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(completed.pagination.total, 1);
        assert_eq!(
            completed.items[0].student.as_ref().unwrap().phone,
            "9000000001"
        );
    }

    #[tokio::test]
    async fn test_deleting_student_cascades_enrollments() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "9000000001").await;
        let course = seed_course(&storage, "Python Basics").await;
        let batch = seed_batch(&storage, course.id, "Morning").await;
        let enrollment = storage
            .create_enrollment_impl(student.id, batch.id)
            .await
            .unwrap();

        assert!(storage.delete_student_impl(student.id).await.unwrap());
        assert!(
            storage
                .get_enrollment_by_id_impl(enrollment.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
