use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::{
    Batches, Courses, Enrollments, Notes, Notifications, Payments, Tests, Videos,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .if_not_exists()
            .name("idx_courses_course_type")
            .table(Courses::Table)
            .col(Courses::CourseType)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_batches_course_id")
            .table(Batches::Table)
            .col(Batches::CourseId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_enrollments_student_batch")
            .table(Enrollments::Table)
            .col(Enrollments::StudentId)
            .col(Enrollments::BatchId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_enrollments_status")
            .table(Enrollments::Table)
            .col(Enrollments::Status)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_payments_student_id")
            .table(Payments::Table)
            .col(Payments::StudentId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_payments_status")
            .table(Payments::Table)
            .col(Payments::Status)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_videos_course_id")
            .table(Videos::Table)
            .col(Videos::CourseId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_notes_course_id")
            .table(Notes::Table)
            .col(Notes::CourseId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_tests_course_id")
            .table(Tests::Table)
            .col(Tests::CourseId)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("idx_notifications_student_id")
            .table(Notifications::Table)
            .col(Notifications::StudentId)
            .to_owned(),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for index in indexes() {
            manager.create_index(index).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let drops = vec![
            Index::drop()
                .name("idx_notifications_student_id")
                .table(Notifications::Table)
                .to_owned(),
            Index::drop()
                .name("idx_tests_course_id")
                .table(Tests::Table)
                .to_owned(),
            Index::drop()
                .name("idx_notes_course_id")
                .table(Notes::Table)
                .to_owned(),
            Index::drop()
                .name("idx_videos_course_id")
                .table(Videos::Table)
                .to_owned(),
            Index::drop()
                .name("idx_payments_status")
                .table(Payments::Table)
                .to_owned(),
            Index::drop()
                .name("idx_payments_student_id")
                .table(Payments::Table)
                .to_owned(),
            Index::drop()
                .name("idx_enrollments_status")
                .table(Enrollments::Table)
                .to_owned(),
            Index::drop()
                .name("idx_enrollments_student_batch")
                .table(Enrollments::Table)
                .to_owned(),
            Index::drop()
                .name("idx_batches_course_id")
                .table(Batches::Table)
                .to_owned(),
            Index::drop()
                .name("idx_courses_course_type")
                .table(Courses::Table)
                .to_owned(),
        ];
        for index in drops {
            manager.drop_index(index).await?;
        }
        Ok(())
    }
}
