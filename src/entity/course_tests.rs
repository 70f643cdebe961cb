//! 课程测验实体 (表名 tests)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub questions_json: String,
    pub duration_mins: Option<i32>,
    pub passing_score: Option<i32>,
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
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_test(self) -> crate::models::courses::entities::Test {
        crate::models::courses::entities::Test {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            questions_json: self.questions_json,
            duration: self.duration_mins,
            passing_score: self.passing_score,
            created_at: super::ts(self.created_at),
        }
    }
}
