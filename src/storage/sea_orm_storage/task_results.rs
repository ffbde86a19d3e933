//! 成绩总表存储操作

use super::SeaOrmStorage;
use crate::entity::task_results::{ActiveModel, Column, Entity as TaskResults, Model};
use crate::errors::{CourseAppError, Result};
use crate::models::{
    cross_check::entities::HistoricalScore,
    task_results::entities::{ScoreInput, TaskResult},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn get_task_result_impl(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskResult>> {
        let result = TaskResults::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseTaskId.eq(course_task_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询成绩失败: {e}")))?;

        result.map(|m| m.into_task_result()).transpose()
    }

    /// 写入一条成绩
    pub async fn save_score_impl(
        &self,
        student_id: i64,
        course_task_id: i64,
        input: ScoreInput,
    ) -> Result<TaskResult> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("开启事务失败: {e}")))?;

        let model = upsert_task_result(&txn, student_id, course_task_id, input).await?;

        txn.commit()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("提交事务失败: {e}")))?;

        model.into_task_result()
    }

    /// 在同一事务中写入多条成绩
    pub async fn save_scores_impl(
        &self,
        course_task_id: i64,
        scores: Vec<(i64, ScoreInput)>,
    ) -> Result<usize> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = 0;
        for (student_id, input) in scores {
            upsert_task_result(&txn, student_id, course_task_id, input).await?;
            saved += 1;
        }

        txn.commit()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }
}

/// 已有记录时追加历史并覆盖当前分数，否则新建
async fn upsert_task_result<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    course_task_id: i64,
    input: ScoreInput,
) -> Result<Model> {
    let now = chrono::Utc::now();
    let entry = HistoricalScore {
        score: input.score,
        comment: input.comment.clone(),
        author_id: input.author_id,
        date_time: now,
    };

    let existing = TaskResults::find()
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::CourseTaskId.eq(course_task_id))
        .one(conn)
        .await
        .map_err(|e| CourseAppError::database_operation(format!("查询成绩失败: {e}")))?;

    let result = match existing {
        Some(model) => {
            let mut history = model.history()?;
            history.push(entry);

            let mut model: ActiveModel = model.into();
            model.score = Set(input.score);
            model.comment = Set(Some(input.comment));
            model.last_checker_id = Set(Some(input.author_id));
            model.historical_scores = Set(serde_json::to_string(&history)?);
            model.updated_at = Set(now.timestamp());
            model.update(conn).await
        }
        None => {
            ActiveModel {
                student_id: Set(student_id),
                course_task_id: Set(course_task_id),
                score: Set(input.score),
                comment: Set(Some(input.comment)),
                last_checker_id: Set(Some(input.author_id)),
                historical_scores: Set(serde_json::to_string(&[entry])?),
                created_at: Set(now.timestamp()),
                updated_at: Set(now.timestamp()),
                ..Default::default()
            }
            .insert(conn)
            .await
        }
    };

    result.map_err(|e| CourseAppError::database_operation(format!("保存成绩失败: {e}")))
}
