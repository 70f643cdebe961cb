//! 管理后台统计

use std::collections::BTreeMap;

use super::SeaOrmStorage;
use super::payments::with_student;
use crate::entity::prelude::{Batches, Courses, Enrollments, Payments, Students};
use crate::entity::{enrollments, payments, students};
use crate::errors::{CodeAuraError, Result};
use crate::models::{
    dashboard::DashboardStats, enrollments::entities::EnrollmentStatus,
    payments::entities::PaymentStatus,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

const RECENT_LIMIT: u64 = 5;

impl SeaOrmStorage {
    async fn count_enrollments_by_status(&self) -> Result<BTreeMap<String, u64>> {
        let rows = Enrollments::find()
            .select_only()
            .column(enrollments::Column::Status)
            .column_as(enrollments::Column::Id.count(), "count")
            .group_by(enrollments::Column::Status)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计报名状态失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| (status, count.max(0) as u64))
            .collect())
    }

    pub async fn get_dashboard_stats_impl(&self) -> Result<DashboardStats> {
        let total_students = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计学生失败: {e}")))?;
        let total_courses = Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计课程失败: {e}")))?;
        let total_batches = Batches::find()
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计批次失败: {e}")))?;

        let enrollments_by_status = self.count_enrollments_by_status().await?;
        let payments_by_status = self.count_payments_by_status().await?;

        let recent_students = Students::find()
            .order_by_desc(students::Column::JoinedAt)
            .order_by_desc(students::Column::Id)
            .limit(RECENT_LIMIT)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询最近学生失败: {e}")))?
            .into_iter()
            .map(|m| m.into_student())
            .collect();

        let recent_enrollment_rows = Enrollments::find()
            .order_by_desc(enrollments::Column::EnrolledAt)
            .order_by_desc(enrollments::Column::Id)
            .limit(RECENT_LIMIT)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询最近报名失败: {e}")))?;
        let recent_enrollments = self.enrollment_details(recent_enrollment_rows).await?;

        let recent_payments = Payments::find()
            .find_also_related(Students)
            .order_by_desc(payments::Column::PaidAt)
            .order_by_desc(payments::Column::Id)
            .limit(RECENT_LIMIT)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询最近支付失败: {e}")))?
            .into_iter()
            .map(with_student)
            .collect();

        let enrollment_count =
            |status: EnrollmentStatus| enrollments_by_status.get(status.as_str()).copied().unwrap_or(0);
        let payment_count =
            |status: PaymentStatus| payments_by_status.get(status.as_str()).copied().unwrap_or(0);

        Ok(DashboardStats {
            total_students,
            total_courses,
            total_batches,
            total_enrollments: enrollments_by_status.values().sum(),
            active_enrollments: enrollment_count(EnrollmentStatus::Active),
            total_payments: payments_by_status.values().sum(),
            pending_payments: payment_count(PaymentStatus::Pending),
            successful_payments: payment_count(PaymentStatus::Success),
            total_revenue: self.sum_payment_amount(Some(PaymentStatus::Success)).await?,
            recent_students,
            recent_enrollments,
            recent_payments,
            enrollments_by_status: enrollments_by_status.clone(),
            payments_by_status: payments_by_status.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::enrollments::entities::EnrollmentStatus;
    use crate::models::payments::{entities::PaymentStatus, requests::NewPayment};

    #[tokio::test]
    async fn test_dashboard_counts_and_revenue() {
        let storage = memory_storage().await;
        let course = seed_course(&storage, "Python Basics").await;
        let batch = seed_batch(&storage, course.id, "Morning").await;

        let mut students = Vec::new();
        for phone in ["9000000001", "9000000002", "9000000003"] {
            students.push(seed_student(&storage, phone).await);
        }

        let first = storage
            .create_enrollment_impl(students[0].id, batch.id)
            .await
            .unwrap();
        storage
            .create_enrollment_impl(students[1].id, batch.id)
            .await
            .unwrap();
        storage
            .update_enrollment_status_impl(first.id, EnrollmentStatus::Dropped)
            .await
            .unwrap();

        let paid = storage
            .create_payment_impl(NewPayment {
                student_id: students[0].id,
                amount: 4999.0,
                method: "cash".into(),
                gateway_order_id: None,
            })
            .await
            .unwrap();
        storage
            .create_payment_impl(NewPayment {
                student_id: students[1].id,
                amount: 1000.0,
                method: "cash".into(),
                gateway_order_id: None,
            })
            .await
            .unwrap();
        storage
            .update_payment_status_impl(paid.id, PaymentStatus::Success, None)
            .await
            .unwrap();

        let stats = storage.get_dashboard_stats_impl().await.unwrap();
        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.total_courses, 1);
        assert_eq!(stats.total_batches, 1);
        assert_eq!(stats.total_enrollments, 2);
        assert_eq!(stats.active_enrollments, 1);
        assert_eq!(stats.enrollments_by_status.get("dropped"), Some(&1));
        assert_eq!(stats.total_payments, 2);
        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.successful_payments, 1);
        assert!((stats.total_revenue - 4999.0).abs() < f64::EPSILON);
        assert_eq!(stats.recent_students.len(), 3);
        assert_eq!(stats.recent_enrollments.len(), 2);
        assert!(
            stats
                .recent_enrollments
                .iter()
                .all(|e| e.student.is_some() && e.course.is_some())
        );
        assert_eq!(stats.recent_payments.len(), 2);
    }
}
