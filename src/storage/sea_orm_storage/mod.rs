//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod admins;
mod batches;
mod courses;
mod dashboard;
mod enrollments;
mod notifications;
mod payments;
mod students;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{CodeAuraError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CodeAuraError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库每个连接都是独立的数据库，只能使用单连接
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            config.pool_size.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| CodeAuraError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| CodeAuraError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CodeAuraError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    admins::{entities::Admin, requests::NewAdmin},
    batches::{
        entities::{Batch, BatchWithCourse},
        requests::{BatchListQuery, CreateBatchRequest, UpdateBatchRequest},
    },
    common::PaginatedResponse,
    courses::{
        entities::{Course, Note, Test, Video},
        requests::{
            CourseListQuery, CreateCourseRequest, CreateNoteRequest, CreateTestRequest,
            CreateVideoRequest, UpdateCourseRequest,
        },
        responses::CourseContentCounts,
    },
    dashboard::DashboardStats,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::EnrollmentListQuery,
        responses::{EnrollmentDetail, EnrollmentWithBatch},
    },
    notifications::{
        entities::Notification, requests::NotificationListQuery,
        responses::NotificationWithStudent,
    },
    payments::{
        entities::{Payment, PaymentStatus},
        requests::{NewPayment, PaymentListQuery},
        responses::{PaymentStats, PaymentWithStudent},
    },
    students::{
        entities::Student,
        requests::{NewStudent, StudentListQuery, UpdateProfileRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学生模块
    async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn get_student_by_phone(&self, phone: &str) -> Result<Option<Student>> {
        self.get_student_by_phone_impl(phone).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Student>> {
        self.update_student_profile_impl(id, update).await
    }

    async fn update_student_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_student_password_impl(id, password_hash).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 后台人员模块
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin> {
        self.create_admin_impl(admin).await
    }

    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        self.get_admin_by_username_impl(username).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn count_course_content(&self, course_id: i64) -> Result<CourseContentCounts> {
        self.count_course_content_impl(course_id).await
    }

    async fn create_video(&self, course_id: i64, video: CreateVideoRequest) -> Result<Video> {
        self.create_video_impl(course_id, video).await
    }

    async fn list_course_videos(&self, course_id: i64) -> Result<Vec<Video>> {
        self.list_course_videos_impl(course_id).await
    }

    async fn create_note(&self, course_id: i64, note: CreateNoteRequest) -> Result<Note> {
        self.create_note_impl(course_id, note).await
    }

    async fn list_course_notes(&self, course_id: i64) -> Result<Vec<Note>> {
        self.list_course_notes_impl(course_id).await
    }

    async fn create_test(&self, course_id: i64, test: CreateTestRequest) -> Result<Test> {
        self.create_test_impl(course_id, test).await
    }

    async fn list_course_tests(&self, course_id: i64) -> Result<Vec<Test>> {
        self.list_course_tests_impl(course_id).await
    }

    // 批次模块
    async fn create_batch(&self, batch: CreateBatchRequest) -> Result<Batch> {
        self.create_batch_impl(batch).await
    }

    async fn get_batch_by_id(&self, id: i64) -> Result<Option<Batch>> {
        self.get_batch_by_id_impl(id).await
    }

    async fn list_batches_by_course(&self, course_id: i64) -> Result<Vec<Batch>> {
        self.list_batches_by_course_impl(course_id).await
    }

    async fn list_batches_with_pagination(
        &self,
        query: BatchListQuery,
    ) -> Result<PaginatedResponse<BatchWithCourse>> {
        self.list_batches_with_pagination_impl(query).await
    }

    async fn update_batch(&self, id: i64, update: UpdateBatchRequest) -> Result<Option<Batch>> {
        self.update_batch_impl(id, update).await
    }

    async fn delete_batch(&self, id: i64) -> Result<bool> {
        self.delete_batch_impl(id).await
    }

    // 报名模块
    async fn create_enrollment(&self, student_id: i64, batch_id: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, batch_id).await
    }

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(id).await
    }

    async fn get_enrollment_with_batch(&self, id: i64) -> Result<Option<EnrollmentWithBatch>> {
        self.get_enrollment_with_batch_impl(id).await
    }

    async fn find_enrollment(
        &self,
        student_id: i64,
        batch_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.find_enrollment_impl(student_id, batch_id).await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrollmentWithBatch>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<EnrollmentDetail>> {
        self.list_enrollments_with_pagination_impl(query).await
    }

    async fn update_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_status_impl(id, status).await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<bool> {
        self.delete_enrollment_impl(id).await
    }

    // 支付模块
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.create_payment_impl(payment).await
    }

    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(id).await
    }

    async fn get_student_payment_by_order(
        &self,
        student_id: i64,
        order_id: &str,
    ) -> Result<Option<Payment>> {
        self.get_student_payment_by_order_impl(student_id, order_id)
            .await
    }

    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<PaymentWithStudent>> {
        self.list_payments_with_pagination_impl(query).await
    }

    async fn list_student_payments(&self, student_id: i64) -> Result<Vec<Payment>> {
        self.list_student_payments_impl(student_id).await
    }

    async fn update_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
        gateway_payment_id: Option<String>,
    ) -> Result<Option<Payment>> {
        self.update_payment_status_impl(id, status, gateway_payment_id)
            .await
    }

    async fn delete_payment(&self, id: i64) -> Result<bool> {
        self.delete_payment_impl(id).await
    }

    async fn get_payment_stats(&self) -> Result<PaymentStats> {
        self.get_payment_stats_impl().await
    }

    // 通知模块
    async fn create_notification(
        &self,
        title: &str,
        message: &str,
        student_id: Option<i64>,
    ) -> Result<Notification> {
        self.create_notification_impl(title, message, student_id)
            .await
    }

    async fn create_notification_for_all_students(
        &self,
        title: &str,
        message: &str,
    ) -> Result<u64> {
        self.create_notification_for_all_students_impl(title, message)
            .await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<NotificationWithStudent>> {
        self.list_notifications_with_pagination_impl(query).await
    }

    async fn count_unread_notifications(&self, student_id: i64) -> Result<u64> {
        self.count_unread_notifications_impl(student_id).await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<bool> {
        self.mark_notification_read_impl(id).await
    }

    async fn mark_all_notifications_read(&self, student_id: i64) -> Result<u64> {
        self.mark_all_notifications_read_impl(student_id).await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    // 统计
    async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        self.get_dashboard_stats_impl().await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// 内存 SQLite，已运行迁移
    pub async fn memory_storage() -> SeaOrmStorage {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        SeaOrmStorage::connect(&config)
            .await
            .expect("in-memory storage")
    }

    pub async fn seed_student(storage: &SeaOrmStorage, phone: &str) -> Student {
        storage
            .create_student_impl(NewStudent {
                name: format!("Student {phone}"),
                phone: phone.to_string(),
                email: format!("{phone}@example.com"),
                password_hash: "hash".to_string(),
                stream: None,
                age: None,
            })
            .await
            .expect("seed student")
    }

    pub async fn seed_course(storage: &SeaOrmStorage, name: &str) -> Course {
        storage
            .create_course_impl(CreateCourseRequest {
                name: name.to_string(),
                course_type: "programming".to_string(),
                fee: 4999.0,
                duration: Some("3 months".to_string()),
                image_url: None,
                description: Some(format!("{name} from scratch")),
                syllabus: None,
            })
            .await
            .expect("seed course")
    }

    pub async fn seed_batch(storage: &SeaOrmStorage, course_id: i64, name: &str) -> Batch {
        storage
            .create_batch_impl(CreateBatchRequest {
                batch_name: name.to_string(),
                course_id,
                timing: Some("18:00-20:00".to_string()),
                faculty: None,
                start_date: Some("2025-04-01".to_string()),
            })
            .await
            .expect("seed batch")
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("codeaura.db").unwrap(),
            "sqlite://codeaura.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }
}
