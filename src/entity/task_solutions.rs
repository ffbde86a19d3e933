//! 作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "task_solutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_task_id: i64,
    pub url: Option<String>,
    pub created_at: i64,
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
    #[sea_orm(
        belongs_to = "super::course_tasks::Entity",
        from = "Column::CourseTaskId",
        to = "super::course_tasks::Column::Id"
    )]
    CourseTask,
    #[sea_orm(has_many = "super::task_solution_checkers::Entity")]
    Checkers,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTask.def()
    }
}

impl Related<super::task_solution_checkers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checkers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_task_solution(self) -> crate::models::cross_check::entities::TaskSolution {
        use crate::models::cross_check::entities::TaskSolution;

        TaskSolution {
            id: self.id,
            student_id: self.student_id,
            course_task_id: self.course_task_id,
            url: self.url,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
