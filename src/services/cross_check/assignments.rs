use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CrossCheckService, ensure_self_or_admin, load_cross_check_task, load_student};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    cross_check::{requests::StudentTaskPath, responses::AssignmentItem},
    users::entities::User,
};
use crate::services::session_user;
use crate::storage::Storage;
use crate::utils::error_response;

/// 学生作为评审人需要检查的作业
pub async fn get_assignments(
    storage: &dyn Storage,
    path: &StudentTaskPath,
    user: &User,
) -> Result<Vec<AssignmentItem>> {
    ensure_self_or_admin(user, &path.github_id)?;

    let student = load_student(storage, path.course_id, &path.github_id).await?;
    let course_task = load_cross_check_task(storage, path.course_id, path.course_task_id).await?;

    storage
        .get_task_solution_assignments(student.id, course_task.id)
        .await
}

pub async fn handle_get_assignments(
    service: &CrossCheckService,
    path: StudentTaskPath,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = session_user(request)?;
        get_assignments(storage.as_ref(), &path, &user).await
    }
    .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Success"))),
        Err(e) => Ok(error_response(&e)),
    }
}
