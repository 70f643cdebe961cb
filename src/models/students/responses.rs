use serde::Serialize;

use super::entities::Student;
use crate::models::enrollments::responses::EnrollmentWithBatch;
use crate::models::payments::entities::Payment;

// 管理后台学生详情
#[derive(Debug, Serialize)]
pub struct StudentDetailResponse {
    pub student: Student,
    pub enrollments: Vec<EnrollmentWithBatch>,
    pub payments: Vec<Payment>,
}
