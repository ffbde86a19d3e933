use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course, load_user_by_github_id, stats::invalidate_stats};
use crate::cache::ObjectCache;
use crate::errors::{CourseAppError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{
        entities::Student,
        requests::{EnrollStudentRequest, UpdateStudentStatusRequest},
        responses::StudentListResponse,
    },
    users::entities::User,
};
use crate::services::{require_admin, session_user};
use crate::storage::Storage;
use crate::utils::{error_response, error_response_with};

/// 按 GitHub ID 将用户加入课程，可同时指定导师
pub async fn enroll_student(
    storage: &dyn Storage,
    cache: Option<&dyn ObjectCache>,
    user: &User,
    course_id: i64,
    req: EnrollStudentRequest,
) -> Result<Student> {
    require_admin(user)?;
    load_course(storage, course_id).await?;

    let student_user = load_user_by_github_id(storage, req.github_id.trim()).await?;
    if storage
        .get_student_by_user_id(course_id, student_user.id)
        .await?
        .is_some()
    {
        return Err(CourseAppError::conflict(format!(
            "{} is already enrolled",
            student_user.github_id
        )));
    }

    let mentor_id = match req.mentor_github_id.as_deref().map(str::trim) {
        Some(github_id) if !github_id.is_empty() => {
            let mentor = storage
                .get_mentor_by_github_id(course_id, github_id)
                .await?
                .ok_or_else(|| {
                    CourseAppError::not_found(format!("Mentor {github_id} not found in course"))
                })?;
            Some(mentor.id)
        }
        _ => None,
    };

    let student = storage
        .enroll_student(course_id, student_user.id, mentor_id)
        .await?;
    invalidate_stats(cache, course_id).await;

    tracing::info!(
        "Enrolled {} into course {} as student {}",
        student_user.github_id,
        course_id,
        student.id
    );
    Ok(student)
}

/// 设置学生活跃状态，非活跃即被开除
pub async fn update_student_status(
    storage: &dyn Storage,
    cache: Option<&dyn ObjectCache>,
    user: &User,
    course_id: i64,
    github_id: &str,
    req: UpdateStudentStatusRequest,
) -> Result<Student> {
    require_admin(user)?;

    let student = storage
        .get_student_by_github_id(course_id, github_id)
        .await?
        .ok_or_else(|| CourseAppError::not_found(format!("Student {github_id} not found")))?;

    let updated = storage
        .update_student_status(student.id, !req.is_active)
        .await?
        .ok_or_else(|| CourseAppError::not_found(format!("Student {github_id} not found")))?;
    invalidate_stats(cache, course_id).await;

    Ok(updated)
}

pub async fn handle_enroll_student(
    service: &CourseService,
    course_id: i64,
    req: EnrollStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = async {
        let user = session_user(request)?;
        enroll_student(storage.as_ref(), cache.as_deref(), &user, course_id, req).await
    }
    .await;

    match result {
        Ok(student) => Ok(HttpResponse::Created().json(ApiResponse::success(student, "Student enrolled"))),
        Err(e @ CourseAppError::Conflict(_)) => {
            Ok(error_response_with(&e, ErrorCode::StudentAlreadyEnrolled))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_list_students(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        load_course(storage.as_ref(), course_id).await?;
        storage.list_course_students(course_id).await
    }
    .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentListResponse { items },
            "Success",
        ))),
        Err(e @ CourseAppError::NotFound(_)) => {
            Ok(error_response_with(&e, ErrorCode::CourseNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_update_student_status(
    service: &CourseService,
    course_id: i64,
    github_id: String,
    req: UpdateStudentStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = async {
        let user = session_user(request)?;
        update_student_status(
            storage.as_ref(),
            cache.as_deref(),
            &user,
            course_id,
            &github_id,
            req,
        )
        .await
    }
    .await;

    match result {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student updated"))),
        Err(e @ CourseAppError::NotFound(_)) => {
            Ok(error_response_with(&e, ErrorCode::StudentNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
