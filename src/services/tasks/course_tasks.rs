use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::errors::{CourseAppError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    tasks::{entities::CourseTask, requests::CreateCourseTaskRequest},
    users::entities::User,
};
use crate::services::{courses::load_course, require_admin, session_user};
use crate::storage::Storage;
use crate::utils::{error_response, error_response_with};

fn validate_course_task(req: &CreateCourseTaskRequest) -> Result<()> {
    if let Some(pairs_count) = req.pairs_count
        && pairs_count < 1
    {
        return Err(CourseAppError::validation("pairs_count must be at least 1"));
    }
    if !req.max_score.is_finite() || req.max_score <= 0.0 {
        return Err(CourseAppError::validation("max_score must be positive"));
    }
    if !req.score_weight.is_finite() || req.score_weight < 0.0 {
        return Err(CourseAppError::validation("score_weight must not be negative"));
    }
    Ok(())
}

pub async fn create_course_task(
    storage: &dyn Storage,
    user: &User,
    course_id: i64,
    req: CreateCourseTaskRequest,
) -> Result<CourseTask> {
    require_admin(user)?;
    validate_course_task(&req)?;
    load_course(storage, course_id).await?;

    if storage.get_task_by_id(req.task_id).await?.is_none() {
        return Err(CourseAppError::invalid_reference(format!(
            "Task {} not found",
            req.task_id
        )));
    }

    let course_task = storage.create_course_task(course_id, req).await?;
    tracing::info!(
        "Course task {} ({}) added to course {}",
        course_task.id,
        course_task.checker,
        course_id
    );
    Ok(course_task)
}

pub async fn handle_create_course_task(
    service: &TaskService,
    course_id: i64,
    req: CreateCourseTaskRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = session_user(request)?;
        create_course_task(storage.as_ref(), &user, course_id, req).await
    }
    .await;

    match result {
        Ok(course_task) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course_task, "Course task created"))),
        Err(e @ CourseAppError::InvalidReference(_)) => {
            Ok(error_response_with(&e, ErrorCode::TaskNotFound))
        }
        Err(e @ CourseAppError::Validation(_)) => {
            Ok(error_response_with(&e, ErrorCode::CourseTaskInvalid))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_list_course_tasks(
    service: &TaskService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        load_course(storage.as_ref(), course_id).await?;
        storage.list_course_tasks(course_id).await
    }
    .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Success"))),
        Err(e @ CourseAppError::NotFound(_)) => {
            Ok(error_response_with(&e, ErrorCode::CourseNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
