use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::enrollments::responses::EnrollmentDetail;
use crate::models::payments::responses::PaymentWithStudent;
use crate::models::students::entities::Student;

/// 管理后台首页统计
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_courses: u64,
    pub total_batches: u64,
    pub total_enrollments: u64,
    pub active_enrollments: u64,
    pub total_payments: u64,
    pub pending_payments: u64,
    pub successful_payments: u64,
    pub total_revenue: f64,
    pub recent_students: Vec<Student>,
    pub recent_enrollments: Vec<EnrollmentDetail>,
    pub recent_payments: Vec<PaymentWithStudent>,
    pub enrollments_by_status: BTreeMap<String, u64>,
    pub payments_by_status: BTreeMap<String, u64>,
}
