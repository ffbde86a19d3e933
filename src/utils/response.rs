//! 服务层错误到 HTTP 响应的映射

use actix_web::{HttpResponse, http::StatusCode};

use crate::errors::CourseAppError;
use crate::models::{ApiResponse, ErrorCode};

/// 错误对应的默认业务码
pub fn error_code_for(err: &CourseAppError) -> ErrorCode {
    match err {
        CourseAppError::Validation(_) => ErrorCode::BadRequest,
        CourseAppError::NotFound(_) => ErrorCode::NotFound,
        CourseAppError::Conflict(_) => ErrorCode::Conflict,
        CourseAppError::Authentication(_) => ErrorCode::Unauthorized,
        CourseAppError::Authorization(_) => ErrorCode::Forbidden,
        CourseAppError::InvalidReference(_) => ErrorCode::CrossCheckInvalidReference,
        CourseAppError::UnsupportedOperation(_) => ErrorCode::CrossCheckNotSupported,
        CourseAppError::MissingAssignment(_) => ErrorCode::CrossCheckNotAssigned,
        _ => ErrorCode::InternalServerError,
    }
}

pub fn status_for(err: &CourseAppError) -> StatusCode {
    match err {
        CourseAppError::Authentication(_) => StatusCode::UNAUTHORIZED,
        CourseAppError::Authorization(_) => StatusCode::FORBIDDEN,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(err: &CourseAppError) -> HttpResponse {
    error_response_with(err, error_code_for(err))
}

/// 使用指定业务码构造错误响应
pub fn error_response_with(err: &CourseAppError, code: ErrorCode) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!("{}", err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_check_failures_are_bad_requests() {
        for err in [
            CourseAppError::invalid_reference("student not found"),
            CourseAppError::unsupported_operation("not supported task"),
            CourseAppError::missing_assignment("no assigned cross-check"),
            CourseAppError::validation("no score provided"),
        ] {
            assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_infrastructure_failures_are_server_errors() {
        let err = CourseAppError::database_operation("disk full");
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_code_for(&err), ErrorCode::InternalServerError);
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            status_for(&CourseAppError::authorization("admin only")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&CourseAppError::authentication("login required")),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_cross_check_codes() {
        assert_eq!(
            error_code_for(&CourseAppError::missing_assignment("x")),
            ErrorCode::CrossCheckNotAssigned
        );
    }
}
