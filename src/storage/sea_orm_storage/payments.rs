//! 支付存储操作

use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::entity::payments::{ActiveModel, Column, Entity as Payments, Model};
use crate::entity::prelude::Students;
use crate::entity::students;
use crate::errors::{CodeAuraError, Result};
use crate::models::{
    common::{PaginatedResponse, PaginationInfo, pagination::normalize_page},
    payments::{
        entities::{Payment, PaymentStatus},
        requests::{NewPayment, PaymentListQuery},
        responses::{PaymentStats, PaymentWithStudent},
    },
    students::entities::StudentBrief,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};

pub(super) fn with_student(
    (payment, student): (Model, Option<students::Model>),
) -> PaymentWithStudent {
    PaymentWithStudent {
        payment: payment.into_payment(),
        student: student.map(|s| StudentBrief::from(s.into_student())),
    }
}

impl SeaOrmStorage {
    /// 创建支付记录，状态为 pending
    pub async fn create_payment_impl(&self, req: NewPayment) -> Result<Payment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            amount: Set(req.amount),
            method: Set(req.method),
            status: Set(PaymentStatus::Pending.to_string()),
            gateway_order_id: Set(req.gateway_order_id),
            gateway_payment_id: Set(None),
            receipt_url: Set(None),
            paid_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                CodeAuraError::conflict(format!("网关订单号重复: {detail}"))
            }
            _ => CodeAuraError::database_operation(format!("创建支付失败: {e}")),
        })?;

        Ok(result.into_payment())
    }

    pub async fn get_payment_by_id_impl(&self, id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询支付失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    pub async fn get_student_payment_by_order_impl(
        &self,
        student_id: i64,
        order_id: &str,
    ) -> Result<Option<Payment>> {
        let result = Payments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::GatewayOrderId.eq(order_id))
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询支付失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    /// 分页列出支付并附带学生信息
    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<PaymentWithStudent>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Payments::find().find_also_related(Students);

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let paginator = select
            .order_by_desc(Column::PaidAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询支付总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询支付页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询支付列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(with_student).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn list_student_payments_impl(&self, student_id: i64) -> Result<Vec<Payment>> {
        let result = Payments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::PaidAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询支付失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_payment()).collect())
    }

    pub async fn update_payment_status_impl(
        &self,
        id: i64,
        status: PaymentStatus,
        gateway_payment_id: Option<String>,
    ) -> Result<Option<Payment>> {
        if self.get_payment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(gateway_payment_id) = gateway_payment_id {
            model.gateway_payment_id = Set(Some(gateway_payment_id));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("更新支付状态失败: {e}")))?;

        Ok(Some(updated.into_payment()))
    }

    pub async fn delete_payment_impl(&self, id: i64) -> Result<bool> {
        let result = Payments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("删除支付失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按状态分组计数
    pub(super) async fn count_payments_by_status(&self) -> Result<BTreeMap<String, u64>> {
        let rows = Payments::find()
            .select_only()
            .column(Column::Status)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Status)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计支付状态失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| (status, count.max(0) as u64))
            .collect())
    }

    /// 金额合计，status 为空时统计全部
    pub(super) async fn sum_payment_amount(&self, status: Option<PaymentStatus>) -> Result<f64> {
        let mut select = Payments::find();
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let total = select
            .select_only()
            .column_as(Column::Amount.sum(), "total")
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计支付金额失败: {e}")))?
            .flatten()
            .unwrap_or(0.0);

        Ok(total)
    }

    pub async fn get_payment_stats_impl(&self) -> Result<PaymentStats> {
        let by_status = self.count_payments_by_status().await?;
        let count_of = |status: PaymentStatus| by_status.get(status.as_str()).copied().unwrap_or(0);

        Ok(PaymentStats {
            total_payments: by_status.values().sum(),
            total_amount: self.sum_payment_amount(None).await?,
            successful_payments: count_of(PaymentStatus::Success),
            pending_payments: count_of(PaymentStatus::Pending),
            failed_payments: count_of(PaymentStatus::Failed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::errors::CodeAuraError;
    use crate::models::payments::{
        entities::PaymentStatus,
        requests::{NewPayment, PaymentListQuery},
    };

    fn new_payment(student_id: i64, amount: f64, order: Option<&str>) -> NewPayment {
        NewPayment {
            student_id,
            amount,
            method: "upi".to_string(),
            gateway_order_id: order.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_payment_stats() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "9000000001").await;

        let first = storage
            .create_payment_impl(new_payment(student.id, 1000.0, None))
            .await
            .unwrap();
        storage
            .create_payment_impl(new_payment(student.id, 250.5, None))
            .await
            .unwrap();
        let third = storage
            .create_payment_impl(new_payment(student.id, 99.5, None))
            .await
            .unwrap();

        storage
            .update_payment_status_impl(first.id, PaymentStatus::Success, None)
            .await
            .unwrap();
        storage
            .update_payment_status_impl(third.id, PaymentStatus::Failed, None)
            .await
            .unwrap();

        let stats = storage.get_payment_stats_impl().await.unwrap();
        assert_eq!(stats.total_payments, 3);
        assert_eq!(stats.successful_payments, 1);
        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.failed_payments, 1);
        assert!((stats.total_amount - 1350.0).abs() < f64::EPSILON);

        let revenue = storage
            .sum_payment_amount(Some(PaymentStatus::Success))
            .await
            .unwrap();
        assert!((revenue - 1000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_empty_stats() {
        let storage = memory_storage().await;
        let stats = storage.get_payment_stats_impl().await.unwrap();
        assert_eq!(stats.total_payments, 0);
        assert_eq!(stats.total_amount, 0.0);
    }

    #[tokio::test]
    async fn test_order_lookup_is_scoped_to_student() {
        let storage = memory_storage().await;
        let owner = seed_student(&storage, "9000000001").await;
        let other = seed_student(&storage, "9000000002").await;

        storage
            .create_payment_impl(new_payment(owner.id, 4999.0, Some("order_abc")))
            .await
            .unwrap();

        assert!(
            storage
                .get_student_payment_by_order_impl(owner.id, "order_abc")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            storage
                .get_student_payment_by_order_impl(other.id, "order_abc")
                .await
                .unwrap()
                .is_none()
        );

        let err = storage
            .create_payment_impl(new_payment(other.id, 10.0, Some("order_abc")))
            .await
            .unwrap_err();
        assert!(matches!(err, CodeAuraError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_verify_stores_gateway_payment_id_and_filters() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "9000000001").await;
        let payment = storage
            .create_payment_impl(new_payment(student.id, 4999.0, Some("order_xyz")))
            .await
            .unwrap();

        let updated = storage
            .update_payment_status_impl(
                payment.id,
                PaymentStatus::Success,
                Some("pay_123".to_string()),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, PaymentStatus::Success);
        assert_eq!(updated.gateway_payment_id.as_deref(), Some("pay_123"));
        assert_eq!(updated.gateway_order_id.as_deref(), Some("order_xyz"));

        let page = storage
            .list_payments_with_pagination_impl(PaymentListQuery {
                status: Some(PaymentStatus::Success),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].student.as_ref().unwrap().id, student.id);
    }
}
