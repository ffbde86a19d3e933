use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;

use super::{CrossCheckService, load_cross_check_task};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    cross_check::{
        entities::TaskSolutionResult,
        requests::CourseTaskPath,
        responses::{CompletionResponse, StudentScore},
    },
    task_results::entities::{SYSTEM_AUTHOR_ID, ScoreInput},
};
use crate::services::{require_admin, session_user};
use crate::storage::Storage;
use crate::utils::error_response;

pub const CROSS_CHECK_SCORE_COMMENT: &str = "Cross-Check score";

/// 按被评学生汇总互评分数
///
/// 取所有评审分数的算术平均并四舍五入，评审数不足 `min_checkers` 的学生不计入。
pub fn aggregate_scores(results: &[TaskSolutionResult], min_checkers: usize) -> Vec<StudentScore> {
    let mut by_student: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for result in results {
        let entry = by_student.entry(result.student_id).or_insert((0.0, 0));
        entry.0 += result.score;
        entry.1 += 1;
    }

    by_student
        .into_iter()
        .filter(|(_, (_, count))| *count > 0 && *count >= min_checkers)
        .map(|(student_id, (sum, count))| StudentScore {
            student_id,
            score: (sum / count as f64).round(),
        })
        .collect()
}

pub async fn get_cross_check_scores(
    storage: &dyn Storage,
    course_task_id: i64,
    min_checkers: usize,
) -> Result<Vec<StudentScore>> {
    let results = storage.list_task_solution_results(course_task_id).await?;
    Ok(aggregate_scores(&results, min_checkers))
}

/// 汇总互评成绩并写入成绩总表
pub async fn complete(
    storage: &dyn Storage,
    course_id: i64,
    course_task_id: i64,
    default_min_checkers: usize,
) -> Result<CompletionResponse> {
    let course_task = load_cross_check_task(storage, course_id, course_task_id).await?;
    let min_checkers = course_task.pairs_count_or(default_min_checkers);

    let scores = get_cross_check_scores(storage, course_task.id, min_checkers).await?;
    let entries = scores
        .iter()
        .map(|s| {
            (
                s.student_id,
                ScoreInput {
                    score: s.score,
                    comment: CROSS_CHECK_SCORE_COMMENT.to_string(),
                    author_id: SYSTEM_AUTHOR_ID,
                },
            )
        })
        .collect();
    let saved_count = storage.save_scores(course_task.id, entries).await?;

    tracing::info!(
        "Cross-check completion for course task {} saved {} scores",
        course_task.id,
        saved_count
    );
    Ok(CompletionResponse {
        saved_count,
        scores,
    })
}

pub async fn handle_create_completion(
    service: &CrossCheckService,
    path: CourseTaskPath,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let default_min_checkers = service.get_config().default_min_checkers;

    let result = async {
        require_admin(&session_user(request)?)?;
        complete(
            storage.as_ref(),
            path.course_id,
            path.course_task_id,
            default_min_checkers,
        )
        .await
    }
    .await;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Cross-check completion saved",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(student_id: i64, checker_id: i64, score: f64) -> TaskSolutionResult {
        let now = chrono::Utc::now();
        TaskSolutionResult {
            id: 0,
            student_id,
            checker_id,
            course_task_id: 1,
            score,
            comment: String::new(),
            historical_scores: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_mean_is_rounded() {
        let results = vec![result(1, 2, 70.0), result(1, 3, 81.0), result(1, 4, 90.0)];
        let scores = aggregate_scores(&results, 3);
        assert_eq!(
            scores,
            vec![StudentScore {
                student_id: 1,
                score: 80.0
            }]
        );
    }

    #[test]
    fn test_students_below_min_checkers_are_skipped() {
        let results = vec![
            result(1, 2, 50.0),
            result(1, 3, 60.0),
            result(2, 1, 100.0),
        ];
        let scores = aggregate_scores(&results, 2);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].student_id, 1);
        assert_eq!(scores[0].score, 55.0);
    }

    #[test]
    fn test_empty_results() {
        assert!(aggregate_scores(&[], 0).is_empty());
    }
}
