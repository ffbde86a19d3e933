//! 课程任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub task_id: i64,
    pub checker: String,
    pub pairs_count: Option<i32>,
    pub max_score: f64,
    pub score_weight: f64,
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
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Task,
    #[sea_orm(has_many = "super::task_solutions::Entity")]
    TaskSolutions,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::task_solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskSolutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course_task(self) -> crate::models::tasks::entities::CourseTask {
        use crate::models::tasks::entities::{CheckerMode, CourseTask};

        CourseTask {
            id: self.id,
            course_id: self.course_id,
            task_id: self.task_id,
            checker: self.checker.parse().unwrap_or(CheckerMode::Mentor),
            pairs_count: self.pairs_count,
            max_score: self.max_score,
            score_weight: self.score_weight,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
