use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::{CourseAppError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{entities::Course, requests::CreateCourseRequest},
    users::entities::User,
};
use crate::services::{require_admin, session_user};
use crate::storage::Storage;
use crate::utils::{error_response, error_response_with, validate::validate_course_alias};

pub async fn create_course(
    storage: &dyn Storage,
    user: &User,
    mut req: CreateCourseRequest,
) -> Result<Course> {
    require_admin(user)?;

    req.name = req.name.trim().to_string();
    if req.name.is_empty() {
        return Err(CourseAppError::validation("Course name is required"));
    }
    validate_course_alias(&req.alias).map_err(CourseAppError::validation)?;

    if storage.get_course_by_alias(&req.alias).await?.is_some() {
        return Err(CourseAppError::conflict(format!(
            "Course alias '{}' already exists",
            req.alias
        )));
    }

    let course = storage.create_course(req).await?;
    tracing::info!("User {} created course {} ({})", user.id, course.id, course.alias);
    Ok(course)
}

pub async fn handle_create_course(
    service: &CourseService,
    req: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = session_user(request)?;
        create_course(storage.as_ref(), &user, req).await
    }
    .await;

    match result {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created"))),
        Err(e @ CourseAppError::Conflict(_)) => {
            Ok(error_response_with(&e, ErrorCode::CourseAlreadyExists))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
