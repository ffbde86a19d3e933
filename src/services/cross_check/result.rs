use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;

use super::{CrossCheckService, load_checker, load_cross_check_task, load_student};
use crate::errors::{CourseAppError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::entities::Student,
    cross_check::{
        entities::{HistoricalScore, TaskSolutionResult},
        requests::{CrossCheckResultRequest, StudentTaskPath},
    },
    tasks::entities::CourseTask,
    users::entities::User,
};
use crate::services::session_user;
use crate::storage::Storage;
use crate::utils::{error_response, error_response_with};

/// 解析评分：接受数字或数字字符串，必须是有限的非负数
pub fn parse_score(value: Option<&Value>) -> Result<f64> {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    score
        .filter(|s| s.is_finite() && *s >= 0.0)
        .ok_or_else(|| CourseAppError::validation("no score provided"))
}

/// 被评学生、评审人（会话用户）与课程任务，且评审人必须已被分配
async fn resolve_assignment(
    storage: &dyn Storage,
    path: &StudentTaskPath,
    user: &User,
) -> Result<(Student, Student, CourseTask)> {
    let student = load_student(storage, path.course_id, &path.github_id).await?;
    let checker = load_checker(storage, path.course_id, user).await?;
    let course_task = load_cross_check_task(storage, path.course_id, path.course_task_id).await?;

    storage
        .get_task_solution_checker(student.id, checker.id, course_task.id)
        .await?
        .ok_or_else(|| CourseAppError::missing_assignment("no assigned cross-check"))?;

    Ok((student, checker, course_task))
}

pub async fn save_result(
    storage: &dyn Storage,
    path: &StudentTaskPath,
    user: &User,
    req: CrossCheckResultRequest,
) -> Result<TaskSolutionResult> {
    let (student, checker, course_task) = resolve_assignment(storage, path, user).await?;
    let score = parse_score(req.score.as_ref())?;

    let entry = HistoricalScore {
        score,
        comment: req.comment.unwrap_or_default(),
        author_id: user.id,
        date_time: chrono::Utc::now(),
    };
    let result = storage
        .save_task_solution_result(student.id, checker.id, course_task.id, entry)
        .await?;

    tracing::info!(
        "User {} scored student {} on course task {}: {}",
        user.id,
        student.id,
        course_task.id,
        score
    );
    Ok(result)
}

pub async fn get_result(
    storage: &dyn Storage,
    path: &StudentTaskPath,
    user: &User,
) -> Result<Option<TaskSolutionResult>> {
    let (student, checker, course_task) = resolve_assignment(storage, path, user).await?;
    storage
        .get_task_solution_result(student.id, checker.id, course_task.id)
        .await
}

pub async fn handle_save_result(
    service: &CrossCheckService,
    path: StudentTaskPath,
    req: CrossCheckResultRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = session_user(request)?;
        save_result(storage.as_ref(), &path, &user, req).await
    }
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Cross-check result saved"))),
        Err(e @ CourseAppError::Validation(_)) => {
            tracing::warn!(
                "Rejected cross-check score for {} on course task {}: {}",
                path.github_id,
                path.course_task_id,
                e
            );
            Ok(error_response_with(&e, ErrorCode::CrossCheckScoreInvalid))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_get_result(
    service: &CrossCheckService,
    path: StudentTaskPath,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = async {
        let user = session_user(request)?;
        get_result(storage.as_ref(), &path, &user).await
    }
    .await;

    match result {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Success"))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numeric_scores() {
        assert_eq!(parse_score(Some(&json!(7))).unwrap(), 7.0);
        assert_eq!(parse_score(Some(&json!(0))).unwrap(), 0.0);
        assert_eq!(parse_score(Some(&json!(8.5))).unwrap(), 8.5);
        assert_eq!(parse_score(Some(&json!(" 42 "))).unwrap(), 42.0);
    }

    #[test]
    fn test_reject_invalid_scores() {
        for value in [json!(-1), json!("-3"), json!("abc"), json!(""), json!(null), json!([1])] {
            let err = parse_score(Some(&value)).unwrap_err();
            assert_eq!(err.message(), "no score provided");
        }
        assert!(parse_score(None).is_err());
        assert!(parse_score(Some(&json!("NaN"))).is_err());
        assert!(parse_score(Some(&json!("inf"))).is_err());
    }
}
