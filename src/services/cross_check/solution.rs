use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CrossCheckService, ensure_self_or_admin, load_cross_check_task, load_student};
use crate::errors::{CourseAppError, Result};
use crate::models::{
    ApiResponse,
    cross_check::{
        entities::TaskSolution,
        requests::{SaveSolutionRequest, StudentTaskPath},
    },
    users::entities::User,
};
use crate::services::session_user;
use crate::storage::Storage;
use crate::utils::{error_response, validate::validate_solution_url};

/// 提交作业链接，已有作业时覆盖链接
pub async fn save_solution(
    storage: &dyn Storage,
    path: &StudentTaskPath,
    user: &User,
    req: SaveSolutionRequest,
) -> Result<TaskSolution> {
    ensure_self_or_admin(user, &path.github_id)?;

    let url = req.url.trim();
    validate_solution_url(url).map_err(CourseAppError::validation)?;

    let student = load_student(storage, path.course_id, &path.github_id).await?;
    let course_task = load_cross_check_task(storage, path.course_id, path.course_task_id).await?;

    storage
        .save_task_solution(student.id, course_task.id, url)
        .await
}

pub async fn handle_save_solution(
    service: &CrossCheckService,
    path: StudentTaskPath,
    req: SaveSolutionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = session_user(request)?;
        save_solution(storage.as_ref(), &path, &user, req).await
    }
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Solution saved"))),
        Err(e) => Ok(error_response(&e)),
    }
}
