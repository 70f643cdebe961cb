use std::sync::Arc;

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
        entities::Notification,
        requests::NotificationListQuery,
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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过邮箱获取学生
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    // 通过手机号获取学生
    async fn get_student_by_phone(&self, phone: &str) -> Result<Option<Student>>;
    // 分页列出学生，search 匹配姓名、邮箱、手机号
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    // 更新个人资料
    async fn update_student_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Student>>;
    // 更新密码哈希
    async fn update_student_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // 删除学生（级联删除报名、支付、通知）
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 后台人员方法
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin>;
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>>;
    async fn count_admins(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 分页列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>>;
    // 部分更新课程
    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（级联删除批次与内容）
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 统计课程视频、讲义、测验数量
    async fn count_course_content(&self, course_id: i64) -> Result<CourseContentCounts>;

    /// 课程内容方法
    async fn create_video(&self, course_id: i64, video: CreateVideoRequest) -> Result<Video>;
    async fn list_course_videos(&self, course_id: i64) -> Result<Vec<Video>>;
    async fn create_note(&self, course_id: i64, note: CreateNoteRequest) -> Result<Note>;
    async fn list_course_notes(&self, course_id: i64) -> Result<Vec<Note>>;
    async fn create_test(&self, course_id: i64, test: CreateTestRequest) -> Result<Test>;
    async fn list_course_tests(&self, course_id: i64) -> Result<Vec<Test>>;

    /// 批次管理方法
    // 创建批次
    async fn create_batch(&self, batch: CreateBatchRequest) -> Result<Batch>;
    // 通过ID获取批次
    async fn get_batch_by_id(&self, id: i64) -> Result<Option<Batch>>;
    // 列出课程下所有批次
    async fn list_batches_by_course(&self, course_id: i64) -> Result<Vec<Batch>>;
    // 分页列出批次（带课程信息）
    async fn list_batches_with_pagination(
        &self,
        query: BatchListQuery,
    ) -> Result<PaginatedResponse<BatchWithCourse>>;
    // 部分更新批次
    async fn update_batch(&self, id: i64, update: UpdateBatchRequest) -> Result<Option<Batch>>;
    // 删除批次（级联删除报名）
    async fn delete_batch(&self, id: i64) -> Result<bool>;

    /// 报名管理方法
    // 创建报名，状态为 active
    async fn create_enrollment(&self, student_id: i64, batch_id: i64) -> Result<Enrollment>;
    // 通过ID获取报名
    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>>;
    // 通过ID获取报名（带批次与课程）
    async fn get_enrollment_with_batch(&self, id: i64) -> Result<Option<EnrollmentWithBatch>>;
    // 查找学生在某批次的报名
    async fn find_enrollment(
        &self,
        student_id: i64,
        batch_id: i64,
    ) -> Result<Option<Enrollment>>;
    // 列出学生的全部报名
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrollmentWithBatch>>;
    // 分页列出报名（带学生、批次、课程）
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<EnrollmentDetail>>;
    // 更新报名状态
    async fn update_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>>;
    // 删除报名
    async fn delete_enrollment(&self, id: i64) -> Result<bool>;

    /// 支付管理方法
    // 创建支付记录，状态为 pending
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;
    // 通过ID获取支付
    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>>;
    // 通过网关订单号获取学生的支付
    async fn get_student_payment_by_order(
        &self,
        student_id: i64,
        order_id: &str,
    ) -> Result<Option<Payment>>;
    // 分页列出支付（带学生信息），按时间倒序
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<PaymentWithStudent>>;
    // 列出学生的全部支付
    async fn list_student_payments(&self, student_id: i64) -> Result<Vec<Payment>>;
    // 更新支付状态，可同时写入网关支付号
    async fn update_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
        gateway_payment_id: Option<String>,
    ) -> Result<Option<Payment>>;
    // 删除支付
    async fn delete_payment(&self, id: i64) -> Result<bool>;
    // 支付统计
    async fn get_payment_stats(&self) -> Result<PaymentStats>;

    /// 通知管理方法
    // 创建单条通知，student_id 为空即广播
    async fn create_notification(
        &self,
        title: &str,
        message: &str,
        student_id: Option<i64>,
    ) -> Result<Notification>;
    // 在一个事务中为每个学生创建一条通知，返回条数
    async fn create_notification_for_all_students(&self, title: &str, message: &str)
    -> Result<u64>;
    // 通过ID获取通知
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    // 分页列出通知，按时间倒序
    async fn list_notifications_with_pagination(
        &self,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<NotificationWithStudent>>;
    // 学生未读数（含广播）
    async fn count_unread_notifications(&self, student_id: i64) -> Result<u64>;
    // 标记已读
    async fn mark_notification_read(&self, id: i64) -> Result<bool>;
    // 标记学生全部通知（含广播）为已读，返回条数
    async fn mark_all_notifications_read(&self, student_id: i64) -> Result<u64>;
    // 删除通知
    async fn delete_notification(&self, id: i64) -> Result<bool>;

    /// 统计方法
    async fn get_dashboard_stats(&self) -> Result<DashboardStats>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
