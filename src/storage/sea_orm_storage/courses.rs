//! 课程及课程内容存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::prelude::{
    NoteActiveModel, Notes, TestActiveModel, Tests, VideoActiveModel, Videos,
};
use crate::entity::{course_tests, notes, videos};
use crate::errors::{CodeAuraError, Result};
use crate::models::{
    common::{PaginatedResponse, PaginationInfo, pagination::normalize_page},
    courses::{
        entities::{Course, Note, Test, Video},
        requests::{
            CourseListQuery, CreateCourseRequest, CreateNoteRequest, CreateTestRequest,
            CreateVideoRequest, UpdateCourseRequest,
        },
        responses::CourseContentCounts,
    },
};
use crate::utils::sql::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            course_type: Set(req.course_type),
            fee: Set(req.fee),
            duration: Set(req.duration),
            image_url: Set(req.image_url),
            description: Set(req.description),
            syllabus: Set(req.syllabus),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程，type/duration 精确匹配，search 匹配名称或简介
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Courses::find();

        if let Some(ref course_type) = query.course_type
            && !course_type.is_empty()
        {
            select = select.filter(Column::CourseType.eq(course_type.as_str()));
        }

        if let Some(ref duration) = query.duration
            && !duration.is_empty()
        {
            select = select.filter(Column::Duration.eq(duration.as_str()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(contains_pattern(search)))
                    .add(Column::Description.like(contains_pattern(search))),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询课程总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询课程页数失败: {e}")))?;
        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
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
        if let Some(course_type) = update.course_type {
            model.course_type = Set(course_type);
        }
        if let Some(fee) = update.fee {
            model.fee = Set(fee);
        }
        if let Some(duration) = update.duration {
            model.duration = Set(Some(duration));
        }
        if let Some(image_url) = update.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(syllabus) = update.syllabus {
            model.syllabus = Set(Some(syllabus));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(updated.into_course()))
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_course_content_impl(&self, course_id: i64) -> Result<CourseContentCounts> {
        let videos = Videos::find()
            .filter(videos::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计视频失败: {e}")))?;
        let notes = Notes::find()
            .filter(notes::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计讲义失败: {e}")))?;
        let tests = Tests::find()
            .filter(course_tests::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计测验失败: {e}")))?;

        Ok(CourseContentCounts {
            videos,
            notes,
            tests,
        })
    }

    // 视频
    pub async fn create_video_impl(&self, course_id: i64, req: CreateVideoRequest) -> Result<Video> {
        let model = VideoActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            video_url: Set(req.video_url),
            duration_secs: Set(req.duration),
            description: Set(req.description),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("添加视频失败: {e}")))?;

        Ok(result.into_video())
    }

    pub async fn list_course_videos_impl(&self, course_id: i64) -> Result<Vec<Video>> {
        let result = Videos::find()
            .filter(videos::Column::CourseId.eq(course_id))
            .order_by_asc(videos::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询视频失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_video()).collect())
    }

    // 讲义
    pub async fn create_note_impl(&self, course_id: i64, req: CreateNoteRequest) -> Result<Note> {
        let model = NoteActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            pdf_url: Set(req.pdf_url),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("添加讲义失败: {e}")))?;

        Ok(result.into_note())
    }

    pub async fn list_course_notes_impl(&self, course_id: i64) -> Result<Vec<Note>> {
        let result = Notes::find()
            .filter(notes::Column::CourseId.eq(course_id))
            .order_by_asc(notes::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询讲义失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_note()).collect())
    }

    // 测验
    pub async fn create_test_impl(&self, course_id: i64, req: CreateTestRequest) -> Result<Test> {
        let model = TestActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            questions_json: Set(req.questions_json),
            duration_mins: Set(req.duration),
            passing_score: Set(req.passing_score),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("添加测验失败: {e}")))?;

        Ok(result.into_test())
    }

    pub async fn list_course_tests_impl(&self, course_id: i64) -> Result<Vec<Test>> {
        let result = Tests::find()
            .filter(course_tests::Column::CourseId.eq(course_id))
            .order_by_asc(course_tests::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_test()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::courses::requests::{
        CourseListQuery, CreateNoteRequest, CreateTestRequest, CreateVideoRequest,
        UpdateCourseRequest,
    };

    #[tokio::test]
    async fn test_filters_and_search() {
        let storage = memory_storage().await;
        seed_course(&storage, "Python Basics").await;
        seed_course(&storage, "Rust Systems").await;

        let found = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                search: Some("Rust".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.pagination.total, 1);
        assert_eq!(found.items[0].name, "Rust Systems");

        let by_type = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                course_type: Some("design".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_type.pagination.total, 0);

        let paged = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                page: Some(2),
                size: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_missing_fields() {
        let storage = memory_storage().await;
        let course = seed_course(&storage, "Python Basics").await;

        let updated = storage
            .update_course_impl(
                course.id,
                UpdateCourseRequest {
                    fee: Some(2999.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.fee, 2999.0);
        assert_eq!(updated.name, "Python Basics");
        assert_eq!(updated.duration.as_deref(), Some("3 months"));
    }

    #[tokio::test]
    async fn test_delete_course_cascades_to_content_and_batches() {
        let storage = memory_storage().await;
        let course = seed_course(&storage, "Python Basics").await;
        let batch = seed_batch(&storage, course.id, "Morning").await;
        storage
            .create_video_impl(
                course.id,
                CreateVideoRequest {
                    title: "Intro".into(),
                    video_url: "https://cdn.example.com/intro.mp4".into(),
                    duration: Some(600),
                    description: None,
                },
            )
            .await
            .unwrap();
        storage
            .create_note_impl(
                course.id,
                CreateNoteRequest {
                    title: "Cheatsheet".into(),
                    pdf_url: "https://cdn.example.com/cheatsheet.pdf".into(),
                },
            )
            .await
            .unwrap();
        storage
            .create_test_impl(
                course.id,
                CreateTestRequest {
                    title: "Quiz 1".into(),
                    questions_json: "[]".into(),
                    duration: Some(20),
                    passing_score: Some(40),
                },
            )
            .await
            .unwrap();

        let counts = storage.count_course_content_impl(course.id).await.unwrap();
        assert_eq!((counts.videos, counts.notes, counts.tests), (1, 1, 1));

        assert!(storage.delete_course_impl(course.id).await.unwrap());

        let counts = storage.count_course_content_impl(course.id).await.unwrap();
        assert_eq!((counts.videos, counts.notes, counts.tests), (0, 0, 0));
        assert!(storage.get_batch_by_id_impl(batch.id).await.unwrap().is_none());
    }
}
