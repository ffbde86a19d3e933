//! 互评分配实体
//!
//! 评审人（checker）与被评审提交之间的多对多关联。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "task_solution_checkers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_task_id: i64,
    pub student_id: i64,
    pub checker_id: i64,
    pub task_solution_id: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::task_solutions::Entity",
        from = "Column::TaskSolutionId",
        to = "super::task_solutions::Column::Id"
    )]
    TaskSolution,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::CheckerId",
        to = "super::students::Column::Id"
    )]
    Checker,
}

impl Related<super::task_solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskSolution.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_task_solution_checker(
        self,
    ) -> crate::models::cross_check::entities::TaskSolutionChecker {
        use crate::models::cross_check::entities::TaskSolutionChecker;

        TaskSolutionChecker {
            id: self.id,
            course_task_id: self.course_task_id,
            student_id: self.student_id,
            checker_id: self.checker_id,
            task_solution_id: self.task_solution_id,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
