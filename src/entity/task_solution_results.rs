//! 互评结果实体

use sea_orm::entity::prelude::*;

use crate::errors::CourseAppError;
use crate::models::cross_check::entities::{HistoricalScore, TaskSolutionResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "task_solution_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub checker_id: i64,
    pub course_task_id: i64,
    pub score: f64,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    /// JSON 数组，按时间顺序保存每次评分
    #[sea_orm(column_type = "Text")]
    pub historical_scores: String,
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
        belongs_to = "super::students::Entity",
        from = "Column::CheckerId",
        to = "super::students::Column::Id"
    )]
    Checker,
    #[sea_orm(
        belongs_to = "super::course_tasks::Entity",
        from = "Column::CourseTaskId",
        to = "super::course_tasks::Column::Id"
    )]
    CourseTask,
}

impl Related<super::course_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTask.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 解析历史评分，内容损坏时返回错误
    pub fn history(&self) -> crate::errors::Result<Vec<HistoricalScore>> {
        serde_json::from_str(&self.historical_scores).map_err(|e| {
            CourseAppError::database_operation(format!(
                "historical_scores of record {} is unreadable: {e}",
                self.id
            ))
        })
    }

    pub fn into_task_solution_result(self) -> crate::errors::Result<TaskSolutionResult> {
        let historical_scores = self.history()?;

        Ok(TaskSolutionResult {
            id: self.id,
            student_id: self.student_id,
            checker_id: self.checker_id,
            course_task_id: self.course_task_id,
            score: self.score,
            comment: self.comment,
            historical_scores,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        })
    }
}
