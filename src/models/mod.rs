pub mod admins;
pub mod auth;
pub mod batches;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod notifications;
pub mod payments;
pub mod students;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 程序启动时间，用于 /api/health 的运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 响应信封中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,
    RateLimitExceeded = 1005,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    AccountInactive = 2002,
    OtpInvalid = 2003,
    PasswordPolicyViolation = 2004,

    // 学生
    StudentNotFound = 3000,
    StudentEmailAlreadyExists = 3001,
    StudentPhoneAlreadyExists = 3002,
    StudentEmailInvalid = 3003,
    StudentPhoneInvalid = 3004,
    StudentNameInvalid = 3005,
    StudentUpdateFailed = 3006,

    // 课程与批次
    CourseNotFound = 4000,
    CourseInvalid = 4001,
    BatchNotFound = 4100,
    BatchInvalid = 4101,
    ContentInvalid = 4200,

    // 报名
    EnrollmentNotFound = 5000,
    AlreadyEnrolled = 5001,
    EnrollmentStatusInvalid = 5002,

    // 支付
    PaymentNotFound = 6000,
    PaymentInvalid = 6001,
    PaymentVerificationFailed = 6002,
    PaymentGatewayError = 6003,
    PaymentStatusInvalid = 6004,

    // 通知
    NotificationNotFound = 7000,
    NotificationInvalid = 7001,

    // 管理后台
    AdminAuthFailed = 8000,
    AdminSessionInvalid = 8001,
}
