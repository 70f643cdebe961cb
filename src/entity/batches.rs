//! 批次实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub batch_name: String,
    pub course_id: i64,
    pub timing: Option<String>,
    pub faculty: Option<String>,
    pub start_date: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_batch(self) -> crate::models::batches::entities::Batch {
        crate::models::batches::entities::Batch {
            id: self.id,
            batch_name: self.batch_name,
            course_id: self.course_id,
            timing: self.timing,
            faculty: self.faculty,
            start_date: self.start_date,
            created_at: super::ts(self.created_at),
        }
    }
}
