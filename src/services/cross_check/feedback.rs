use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CrossCheckService, ensure_self_or_admin, load_cross_check_task, load_student};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    cross_check::{
        requests::StudentTaskPath,
        responses::{FeedbackComment, FeedbackResponse},
    },
    users::entities::User,
};
use crate::services::session_user;
use crate::storage::Storage;
use crate::utils::error_response;

/// 学生作业链接与收到的评语，不暴露评审人
pub async fn get_task_solution_feedback(
    storage: &dyn Storage,
    student_id: i64,
    course_task_id: i64,
) -> Result<FeedbackResponse> {
    let url = storage
        .get_task_solution(student_id, course_task_id)
        .await?
        .and_then(|solution| solution.url);

    let comments = storage
        .list_task_solution_results_for_student(student_id, course_task_id)
        .await?
        .into_iter()
        .filter(|result| !result.comment.trim().is_empty())
        .map(|result| FeedbackComment {
            comment: result.comment,
        })
        .collect();

    Ok(FeedbackResponse { url, comments })
}

pub async fn get_feedback(
    storage: &dyn Storage,
    path: &StudentTaskPath,
    user: &User,
) -> Result<FeedbackResponse> {
    ensure_self_or_admin(user, &path.github_id)?;

    let student = load_student(storage, path.course_id, &path.github_id).await?;
    let course_task = load_cross_check_task(storage, path.course_id, path.course_task_id).await?;

    get_task_solution_feedback(storage, student.id, course_task.id).await
}

pub async fn handle_get_feedback(
    service: &CrossCheckService,
    path: StudentTaskPath,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = session_user(request)?;
        get_feedback(storage.as_ref(), &path, &user).await
    }
    .await;

    match result {
        Ok(feedback) => Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "Success"))),
        Err(e) => Ok(error_response(&e)),
    }
}
