//! 互评流程：提交作业、分配评审、评分、汇总成绩
//!
//! 每个操作拆成两层：核心函数只依赖 `Storage` 与显式传入的会话用户，
//! `handle_*` 负责从请求中取出依赖并把结果映射为响应。

pub mod assignments;
pub mod completion;
pub mod distribution;
pub mod feedback;
pub mod result;
pub mod solution;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::{AppConfig, CrossCheckConfig};
use crate::errors::{CourseAppError, Result};
use crate::models::{
    courses::entities::Student,
    cross_check::requests::{
        CourseTaskPath, CrossCheckResultRequest, SaveSolutionRequest, StudentTaskPath,
    },
    tasks::entities::CourseTask,
    users::entities::User,
};
use crate::storage::Storage;

pub struct CrossCheckService {
    storage: Option<Arc<dyn Storage>>,
}

impl CrossCheckService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &CrossCheckConfig {
        &AppConfig::get().cross_check
    }

    // 提交或更新作业
    pub async fn save_solution(
        &self,
        path: StudentTaskPath,
        req: SaveSolutionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        solution::handle_save_solution(self, path, req, request).await
    }

    // 分配互评
    pub async fn create_distribution(
        &self,
        path: CourseTaskPath,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        distribution::handle_create_distribution(self, path, request).await
    }

    // 评分
    pub async fn save_result(
        &self,
        path: StudentTaskPath,
        req: CrossCheckResultRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        result::handle_save_result(self, path, req, request).await
    }

    pub async fn get_result(
        &self,
        path: StudentTaskPath,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        result::handle_get_result(self, path, request).await
    }

    // 学生需要评审的作业
    pub async fn get_assignments(
        &self,
        path: StudentTaskPath,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::handle_get_assignments(self, path, request).await
    }

    // 汇总成绩
    pub async fn create_completion(
        &self,
        path: CourseTaskPath,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        completion::handle_create_completion(self, path, request).await
    }

    // 学生收到的评语
    pub async fn get_feedback(
        &self,
        path: StudentTaskPath,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        feedback::handle_get_feedback(self, path, request).await
    }
}

/// 课程任务必须属于该课程，且评审方式为互评
pub(crate) async fn load_cross_check_task(
    storage: &dyn Storage,
    course_id: i64,
    course_task_id: i64,
) -> Result<CourseTask> {
    let course_task = storage
        .get_course_task(course_task_id)
        .await?
        .filter(|task| task.course_id == course_id)
        .ok_or_else(|| CourseAppError::invalid_reference("not valid student or course task"))?;

    if !course_task.is_cross_check() {
        return Err(CourseAppError::unsupported_operation("not supported task"));
    }
    Ok(course_task)
}

pub(crate) async fn load_student(
    storage: &dyn Storage,
    course_id: i64,
    github_id: &str,
) -> Result<Student> {
    storage
        .get_student_by_github_id(course_id, github_id)
        .await?
        .ok_or_else(|| CourseAppError::invalid_reference("not valid student or course task"))
}

/// 会话用户在该课程中的学籍即评审人身份
pub(crate) async fn load_checker(
    storage: &dyn Storage,
    course_id: i64,
    user: &User,
) -> Result<Student> {
    storage
        .get_student_by_user_id(course_id, user.id)
        .await?
        .ok_or_else(|| CourseAppError::invalid_reference("not valid student or course task"))
}

/// 只有学生本人或管理员可以访问
pub(crate) fn ensure_self_or_admin(user: &User, github_id: &str) -> Result<()> {
    if user.is_admin() || user.github_id == github_id {
        Ok(())
    } else {
        Err(CourseAppError::authorization(
            "Only the student or an admin can access this resource",
        ))
    }
}
