use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(
                        ColumnDef::new(Students::Phone)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Students::PhotoUrl).string().null())
                    .col(ColumnDef::new(Students::Stream).string_len(100).null())
                    .col(ColumnDef::new(Students::Age).integer().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::JoinedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 管理员表（与学生分开认证）
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Admins::Role).string().not_null())
                    .col(ColumnDef::new(Admins::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::CourseType).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Fee).double().not_null())
                    .col(ColumnDef::new(Courses::Duration).string_len(50).null())
                    .col(ColumnDef::new(Courses::ImageUrl).string().null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::Syllabus).text().null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 批次表
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batches::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batches::BatchName).string().not_null())
                    .col(ColumnDef::new(Batches::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Batches::Timing).string_len(100).null())
                    .col(ColumnDef::new(Batches::Faculty).string().null())
                    .col(ColumnDef::new(Batches::StartDate).string_len(10).null())
                    .col(ColumnDef::new(Batches::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Batches::Table, Batches::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 报名表（学生 <-> 批次）
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::BatchId).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::BatchId)
                            .to(Batches::Table, Batches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 支付表
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(ColumnDef::new(Payments::Method).string_len(50).not_null())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Payments::GatewayOrderId)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::GatewayPaymentId).string().null())
                    .col(ColumnDef::new(Payments::ReceiptUrl).string().null())
                    .col(ColumnDef::new(Payments::PaidAt).big_integer().not_null())
                    .col(ColumnDef::new(Payments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程视频
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Videos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Videos::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Videos::Title).string().not_null())
                    .col(ColumnDef::new(Videos::VideoUrl).string().not_null())
                    .col(ColumnDef::new(Videos::DurationSecs).integer().null())
                    .col(ColumnDef::new(Videos::Description).text().null())
                    .col(ColumnDef::new(Videos::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Videos::Table, Videos::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程讲义
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(ColumnDef::new(Notes::PdfUrl).string().not_null())
                    .col(ColumnDef::new(Notes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程测验
        manager
            .create_table(
                Table::create()
                    .table(Tests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tests::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Tests::Title).string().not_null())
                    .col(ColumnDef::new(Tests::QuestionsJson).text().not_null())
                    .col(ColumnDef::new(Tests::DurationMins).integer().null())
                    .col(ColumnDef::new(Tests::PassingScore).integer().null())
                    .col(ColumnDef::new(Tests::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tests::Table, Tests::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 通知表，student_id 为空表示广播
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::StudentId).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Name,
    Phone,
    Email,
    PasswordHash,
    PhotoUrl,
    Stream,
    Age,
    Status,
    JoinedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    CourseType,
    Fee,
    Duration,
    ImageUrl,
    Description,
    Syllabus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Batches {
    #[sea_orm(iden = "batches")]
    Table,
    Id,
    BatchName,
    CourseId,
    Timing,
    Faculty,
    StartDate,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    StudentId,
    BatchId,
    Status,
    EnrolledAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    StudentId,
    Amount,
    Method,
    Status,
    GatewayOrderId,
    GatewayPaymentId,
    ReceiptUrl,
    PaidAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Videos {
    #[sea_orm(iden = "videos")]
    Table,
    Id,
    CourseId,
    Title,
    VideoUrl,
    DurationSecs,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Notes {
    #[sea_orm(iden = "notes")]
    Table,
    Id,
    CourseId,
    Title,
    PdfUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Tests {
    #[sea_orm(iden = "tests")]
    Table,
    Id,
    CourseId,
    Title,
    QuestionsJson,
    DurationMins,
    PassingScore,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    Title,
    Message,
    StudentId,
    IsRead,
    CreatedAt,
}
