//! 学生实体（用户在某门课程中的学籍）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub mentor_id: Option<i64>,
    pub is_expelled: bool,
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::mentors::Entity",
        from = "Column::MentorId",
        to = "super::mentors::Column::Id"
    )]
    Mentor,
    #[sea_orm(has_many = "super::task_solutions::Entity")]
    TaskSolutions,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::mentors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mentor.def()
    }
}

impl Related<super::task_solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskSolutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::courses::entities::Student {
        use crate::models::courses::entities::Student;

        Student {
            id: self.id,
            course_id: self.course_id,
            user_id: self.user_id,
            mentor_id: self.mentor_id,
            is_expelled: self.is_expelled,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
