//! 支付实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub method: String,
    pub status: String,
    #[sea_orm(unique)]
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub receipt_url: Option<String>,
    pub paid_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(self) -> crate::models::payments::entities::Payment {
        use crate::models::payments::entities::{Payment, PaymentStatus};

        Payment {
            id: self.id,
            student_id: self.student_id,
            amount: self.amount,
            method: self.method,
            status: self
                .status
                .parse::<PaymentStatus>()
                .unwrap_or(PaymentStatus::Pending),
            gateway_order_id: self.gateway_order_id,
            gateway_payment_id: self.gateway_payment_id,
            receipt_url: self.receipt_url,
            paid_at: super::ts(self.paid_at),
            updated_at: super::ts(self.updated_at),
        }
    }
}
