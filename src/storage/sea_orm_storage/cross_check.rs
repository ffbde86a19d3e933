//! 互评存储操作：作业、分配与评分

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{students, task_solution_checkers, task_solution_results, task_solutions, users};
use crate::errors::{CourseAppError, Result};
use crate::models::{
    courses::entities::StudentBasic,
    cross_check::{
        entities::{
            HistoricalScore, NewTaskSolutionChecker, TaskSolution, TaskSolutionChecker,
            TaskSolutionResult,
        },
        responses::AssignmentItem,
    },
    users::entities::display_name,
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn get_task_solution_impl(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolution>> {
        let result = task_solutions::Entity::find()
            .filter(task_solutions::Column::StudentId.eq(student_id))
            .filter(task_solutions::Column::CourseTaskId.eq(course_task_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_task_solution()))
    }

    /// 创建或更新作业链接
    pub async fn save_task_solution_impl(
        &self,
        student_id: i64,
        course_task_id: i64,
        url: &str,
    ) -> Result<TaskSolution> {
        let now = chrono::Utc::now().timestamp();

        let existing = task_solutions::Entity::find()
            .filter(task_solutions::Column::StudentId.eq(student_id))
            .filter(task_solutions::Column::CourseTaskId.eq(course_task_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询作业失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut model: task_solutions::ActiveModel = model.into();
                model.url = Set(Some(url.to_string()));
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            None => {
                task_solutions::ActiveModel {
                    student_id: Set(student_id),
                    course_task_id: Set(course_task_id),
                    url: Set(Some(url.to_string())),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| CourseAppError::database_operation(format!("保存作业失败: {e}")))?;

        Ok(result.into_task_solution())
    }

    /// 尚未分配评审人的作业
    pub async fn get_task_solutions_without_checker_impl(
        &self,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolution>> {
        let distributed = Query::select()
            .column(task_solution_checkers::Column::TaskSolutionId)
            .from(task_solution_checkers::Entity)
            .and_where(task_solution_checkers::Column::CourseTaskId.eq(course_task_id))
            .to_owned();

        let result = task_solutions::Entity::find()
            .filter(task_solutions::Column::CourseTaskId.eq(course_task_id))
            .filter(task_solutions::Column::Id.not_in_subquery(distributed))
            .order_by_asc(task_solutions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询待分配作业失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_task_solution()).collect())
    }

    /// 批量写入分配记录，任一失败则整体回滚
    pub async fn create_task_solution_checkers_impl(
        &self,
        checkers: Vec<NewTaskSolutionChecker>,
    ) -> Result<Vec<TaskSolutionChecker>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::with_capacity(checkers.len());
        for checker in checkers {
            let model = task_solution_checkers::ActiveModel {
                course_task_id: Set(checker.course_task_id),
                student_id: Set(checker.student_id),
                checker_id: Set(checker.checker_id),
                task_solution_id: Set(checker.task_solution_id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("写入互评分配失败: {e}")))?;
            created.push(model.into_task_solution_checker());
        }

        txn.commit()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created)
    }

    pub async fn get_task_solution_checker_impl(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolutionChecker>> {
        let result = task_solution_checkers::Entity::find()
            .filter(task_solution_checkers::Column::StudentId.eq(student_id))
            .filter(task_solution_checkers::Column::CheckerId.eq(checker_id))
            .filter(task_solution_checkers::Column::CourseTaskId.eq(course_task_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询互评分配失败: {e}")))?;

        Ok(result.map(|m| m.into_task_solution_checker()))
    }

    /// checker 需要评审的作业及作者信息
    pub async fn get_task_solution_assignments_impl(
        &self,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Vec<AssignmentItem>> {
        let rows = task_solution_checkers::Entity::find()
            .find_also_related(task_solutions::Entity)
            .filter(task_solution_checkers::Column::CheckerId.eq(checker_id))
            .filter(task_solution_checkers::Column::CourseTaskId.eq(course_task_id))
            .order_by_asc(task_solution_checkers::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询互评分配失败: {e}")))?;

        let student_ids: Vec<i64> = rows.iter().map(|(c, _)| c.student_id).collect();
        let authors: HashMap<i64, StudentBasic> = students::Entity::find()
            .find_also_related(users::Entity)
            .filter(students::Column::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .filter_map(|(student, user)| {
                let user = user?;
                Some((
                    student.id,
                    StudentBasic {
                        id: student.id,
                        name: display_name(
                            user.first_name.as_deref(),
                            user.last_name.as_deref(),
                            &user.github_id,
                        ),
                        github_id: user.github_id,
                        is_active: !student.is_expelled,
                    },
                ))
            })
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(checker, solution)| {
                let student = authors.get(&checker.student_id)?.clone();
                Some(AssignmentItem {
                    student,
                    url: solution.and_then(|s| s.url),
                })
            })
            .collect())
    }

    pub async fn get_task_solution_result_impl(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolutionResult>> {
        let result = task_solution_results::Entity::find()
            .filter(task_solution_results::Column::StudentId.eq(student_id))
            .filter(task_solution_results::Column::CheckerId.eq(checker_id))
            .filter(task_solution_results::Column::CourseTaskId.eq(course_task_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询互评结果失败: {e}")))?;

        result.map(|m| m.into_task_solution_result()).transpose()
    }

    /// 写入评分：首次插入，之后追加历史并覆盖当前分数与评语
    pub async fn save_task_solution_result_impl(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
        entry: HistoricalScore,
    ) -> Result<TaskSolutionResult> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = task_solution_results::Entity::find()
            .filter(task_solution_results::Column::StudentId.eq(student_id))
            .filter(task_solution_results::Column::CheckerId.eq(checker_id))
            .filter(task_solution_results::Column::CourseTaskId.eq(course_task_id))
            .one(&txn)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询互评结果失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut history = model.history()?;
                history.push(entry.clone());

                let mut model: task_solution_results::ActiveModel = model.into();
                model.score = Set(entry.score);
                model.comment = Set(entry.comment);
                model.historical_scores = Set(serde_json::to_string(&history)?);
                model.updated_at = Set(now);
                model.update(&txn).await
            }
            None => {
                let history = vec![entry.clone()];
                task_solution_results::ActiveModel {
                    student_id: Set(student_id),
                    checker_id: Set(checker_id),
                    course_task_id: Set(course_task_id),
                    score: Set(entry.score),
                    comment: Set(entry.comment),
                    historical_scores: Set(serde_json::to_string(&history)?),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
            }
        }
        .map_err(|e| CourseAppError::database_operation(format!("保存互评结果失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("提交事务失败: {e}")))?;

        result.into_task_solution_result()
    }

    /// 某学生收到的全部评分
    pub async fn list_task_solution_results_for_student_impl(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolutionResult>> {
        let result = task_solution_results::Entity::find()
            .filter(task_solution_results::Column::StudentId.eq(student_id))
            .filter(task_solution_results::Column::CourseTaskId.eq(course_task_id))
            .order_by_asc(task_solution_results::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询互评结果失败: {e}")))?;

        result
            .into_iter()
            .map(|m| m.into_task_solution_result())
            .collect()
    }

    pub async fn list_task_solution_results_impl(
        &self,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolutionResult>> {
        let result = task_solution_results::Entity::find()
            .filter(task_solution_results::Column::CourseTaskId.eq(course_task_id))
            .order_by_asc(task_solution_results::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询互评结果失败: {e}")))?;

        result
            .into_iter()
            .map(|m| m.into_task_solution_result())
            .collect()
    }
}
