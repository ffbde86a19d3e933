use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course, load_user_by_github_id, stats::invalidate_stats};
use crate::cache::ObjectCache;
use crate::errors::{CourseAppError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{entities::Mentor, requests::AddMentorRequest, responses::MentorListResponse},
    users::entities::User,
};
use crate::services::{require_admin, session_user};
use crate::storage::Storage;
use crate::utils::{error_response, error_response_with};

const DEFAULT_MAX_STUDENTS: i32 = 2;

pub async fn add_mentor(
    storage: &dyn Storage,
    cache: Option<&dyn ObjectCache>,
    user: &User,
    course_id: i64,
    req: AddMentorRequest,
) -> Result<Mentor> {
    require_admin(user)?;
    load_course(storage, course_id).await?;

    let max_students = req.max_students.unwrap_or(DEFAULT_MAX_STUDENTS);
    if max_students < 1 {
        return Err(CourseAppError::validation("max_students must be at least 1"));
    }

    let github_id = req.github_id.trim();
    if storage
        .get_mentor_by_github_id(course_id, github_id)
        .await?
        .is_some()
    {
        return Err(CourseAppError::conflict(format!(
            "{github_id} is already a mentor of this course"
        )));
    }
    let mentor_user = load_user_by_github_id(storage, github_id).await?;

    let mentor = storage
        .add_mentor(course_id, mentor_user.id, max_students)
        .await?;
    invalidate_stats(cache, course_id).await;
    Ok(mentor)
}

pub async fn handle_add_mentor(
    service: &CourseService,
    course_id: i64,
    req: AddMentorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = async {
        let user = session_user(request)?;
        add_mentor(storage.as_ref(), cache.as_deref(), &user, course_id, req).await
    }
    .await;

    match result {
        Ok(mentor) => Ok(HttpResponse::Created().json(ApiResponse::success(mentor, "Mentor added"))),
        Err(e @ CourseAppError::Conflict(_)) => {
            Ok(error_response_with(&e, ErrorCode::MentorAlreadyExists))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_list_mentors(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        load_course(storage.as_ref(), course_id).await?;
        storage.list_course_mentors(course_id).await
    }
    .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MentorListResponse { items },
            "Success",
        ))),
        Err(e @ CourseAppError::NotFound(_)) => {
            Ok(error_response_with(&e, ErrorCode::CourseNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
