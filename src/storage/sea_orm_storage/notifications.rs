//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::entity::prelude::Students;
use crate::entity::students;
use crate::errors::{CodeAuraError, Result};
use crate::models::{
    common::{PaginatedResponse, PaginationInfo, pagination::normalize_page},
    notifications::{
        entities::Notification, requests::NotificationListQuery,
        responses::NotificationWithStudent,
    },
    students::entities::StudentBrief,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 学生可见的通知：发给自己或广播
fn visible_to(student_id: i64) -> Condition {
    Condition::any()
        .add(Column::StudentId.eq(student_id))
        .add(Column::StudentId.is_null())
}

impl SeaOrmStorage {
    pub async fn create_notification_impl(
        &self,
        title: &str,
        message: &str,
        student_id: Option<i64>,
    ) -> Result<Notification> {
        let model = ActiveModel {
            title: Set(title.to_string()),
            message: Set(message.to_string()),
            student_id: Set(student_id),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 为每个学生各写一条通知，全部在同一事务内完成
    pub async fn create_notification_for_all_students_impl(
        &self,
        title: &str,
        message: &str,
    ) -> Result<u64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("开启事务失败: {e}")))?;

        let student_ids = Students::find()
            .select_only()
            .column(students::Column::Id)
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询学生失败: {e}")))?;

        if student_ids.is_empty() {
            txn.commit()
                .await
                .map_err(|e| CodeAuraError::database_operation(format!("提交事务失败: {e}")))?;
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = student_ids.len() as u64;
        let models = student_ids.into_iter().map(|student_id| ActiveModel {
            title: Set(title.to_string()),
            message: Set(message.to_string()),
            student_id: Set(Some(student_id)),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        });

        Notifications::insert_many(models)
            .exec(&txn)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("批量创建通知失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(count)
    }

    pub async fn get_notification_by_id_impl(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(result.map(|m| m.into_notification()))
    }

    pub async fn list_notifications_with_pagination_impl(
        &self,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<NotificationWithStudent>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Notifications::find().find_also_related(Students);

        if let Some(student_id) = query.student_id {
            select = select.filter(visible_to(student_id));
        }
        if query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询通知总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询通知页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows
                .into_iter()
                .map(|(notification, student)| NotificationWithStudent {
                    notification: notification.into_notification(),
                    student: student.map(|s| StudentBrief::from(s.into_student())),
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn count_unread_notifications_impl(&self, student_id: i64) -> Result<u64> {
        Notifications::find()
            .filter(visible_to(student_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("统计未读通知失败: {e}")))
    }

    pub async fn mark_notification_read_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 广播只有一个已读标记，学生标记后对所有人生效
    pub async fn mark_all_notifications_read_impl(&self, student_id: i64) -> Result<u64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(visible_to(student_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected)
    }

    pub async fn delete_notification_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeAuraError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::notifications::requests::NotificationListQuery;

    #[tokio::test]
    async fn test_student_sees_own_and_broadcast() {
        let storage = memory_storage().await;
        let alice = seed_student(&storage, "9000000001").await;
        let bob = seed_student(&storage, "9000000002").await;

        storage
            .create_notification_impl("Fee due", "Pay by Friday", Some(alice.id))
            .await
            .unwrap();
        storage
            .create_notification_impl("Holiday", "Institute closed Monday", None)
            .await
            .unwrap();
        storage
            .create_notification_impl("Batch moved", "Now at 6pm", Some(bob.id))
            .await
            .unwrap();

        let alice_list = storage
            .list_notifications_with_pagination_impl(NotificationListQuery {
                student_id: Some(alice.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(alice_list.pagination.total, 2);
        assert!(
            alice_list
                .items
                .iter()
                .all(|n| n.notification.visible_to(alice.id))
        );

        let everything = storage
            .list_notifications_with_pagination_impl(NotificationListQuery::default())
            .await
            .unwrap();
        assert_eq!(everything.pagination.total, 3);

        assert_eq!(
            storage.count_unread_notifications_impl(alice.id).await.unwrap(),
            2
        );
        assert_eq!(
            storage.mark_all_notifications_read_impl(alice.id).await.unwrap(),
            2
        );
        assert_eq!(
            storage.count_unread_notifications_impl(alice.id).await.unwrap(),
            0
        );
        // bob 的私信不受影响
        assert_eq!(
            storage.count_unread_notifications_impl(bob.id).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_send_to_all_students() {
        let storage = memory_storage().await;
        assert_eq!(
            storage
                .create_notification_for_all_students_impl("Welcome", "Hello")
                .await
                .unwrap(),
            0
        );

        seed_student(&storage, "9000000001").await;
        seed_student(&storage, "9000000002").await;
        seed_student(&storage, "9000000003").await;

        let sent = storage
            .create_notification_for_all_students_impl("Welcome", "Hello")
            .await
            .unwrap();
        assert_eq!(sent, 3);

        let page = storage
            .list_notifications_with_pagination_impl(NotificationListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);
        assert!(page.items.iter().all(|n| n.student.is_some()));
    }

    #[tokio::test]
    async fn test_unread_only_and_mark_read() {
        let storage = memory_storage().await;
        let alice = seed_student(&storage, "9000000001").await;
        let first = storage
            .create_notification_impl("A", "a", Some(alice.id))
            .await
            .unwrap();
        storage
            .create_notification_impl("B", "b", Some(alice.id))
            .await
            .unwrap();

        assert!(storage.mark_notification_read_impl(first.id).await.unwrap());
        assert!(!storage.mark_notification_read_impl(9999).await.unwrap());

        let unread = storage
            .list_notifications_with_pagination_impl(NotificationListQuery {
                student_id: Some(alice.id),
                unread_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(unread.pagination.total, 1);
        assert_eq!(unread.items[0].notification.title, "B");
    }
}
