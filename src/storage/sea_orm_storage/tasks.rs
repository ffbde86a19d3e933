//! 任务与课程任务存储操作

use super::SeaOrmStorage;
use crate::entity::course_tasks;
use crate::entity::tasks::{ActiveModel, Entity as Tasks};
use crate::errors::{CourseAppError, Result};
use crate::models::tasks::{
    entities::{CourseTask, Task},
    requests::{CreateCourseTaskRequest, CreateTaskRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建任务
    pub async fn create_task_impl(&self, req: CreateTaskRequest) -> Result<Task> {
        let model = ActiveModel {
            name: Set(req.name),
            description_url: Set(req.description_url),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("创建任务失败: {e}")))?;

        Ok(result.into_task())
    }

    pub async fn get_task_by_id_impl(&self, task_id: i64) -> Result<Option<Task>> {
        let result = Tasks::find_by_id(task_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询任务失败: {e}")))?;

        Ok(result.map(|m| m.into_task()))
    }

    /// 将任务挂到课程上
    pub async fn create_course_task_impl(
        &self,
        course_id: i64,
        req: CreateCourseTaskRequest,
    ) -> Result<CourseTask> {
        let model = course_tasks::ActiveModel {
            course_id: Set(course_id),
            task_id: Set(req.task_id),
            checker: Set(req.checker.as_str().to_string()),
            pairs_count: Set(req.pairs_count),
            max_score: Set(req.max_score),
            score_weight: Set(req.score_weight),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("创建课程任务失败: {e}")))?;

        Ok(result.into_course_task())
    }

    pub async fn get_course_task_impl(&self, course_task_id: i64) -> Result<Option<CourseTask>> {
        let result = course_tasks::Entity::find_by_id(course_task_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询课程任务失败: {e}")))?;

        Ok(result.map(|m| m.into_course_task()))
    }

    pub async fn list_course_tasks_impl(&self, course_id: i64) -> Result<Vec<CourseTask>> {
        let result = course_tasks::Entity::find()
            .filter(course_tasks::Column::CourseId.eq(course_id))
            .order_by_asc(course_tasks::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseAppError::database_operation(format!("查询课程任务列表失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_course_task()).collect())
    }
}
