use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course};
use crate::errors::CourseAppError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::{error_response, error_response_with};

pub async fn handle_get_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_course(storage.as_ref(), course_id).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Success"))),
        Err(e @ CourseAppError::NotFound(_)) => {
            Ok(error_response_with(&e, ErrorCode::CourseNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
