//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub photo_url: Option<String>,
    pub stream: Option<String>,
    pub age: Option<i32>,
    pub status: String,
    pub joined_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Student, StudentStatus};

        Student {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            password_hash: self.password_hash,
            photo_url: self.photo_url,
            stream: self.stream,
            age: self.age,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Active),
            joined_at: super::ts(self.joined_at),
            updated_at: super::ts(self.updated_at),
        }
    }
}
