use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use super::fixtures;
use crate::entity::{task_results, task_solution_results};
use crate::storage::Storage;
use crate::models::{
    cross_check::entities::{HistoricalScore, NewTaskSolutionChecker},
    task_results::entities::{SYSTEM_AUTHOR_ID, ScoreInput},
    tasks::entities::CheckerMode,
};

fn entry(score: f64, comment: &str, author_id: i64) -> HistoricalScore {
    HistoricalScore {
        score,
        comment: comment.to_string(),
        author_id,
        date_time: Utc::now(),
    }
}

#[tokio::test]
async fn test_student_lookup_by_github_id_is_scoped_to_course() {
    let storage = fixtures::memory_storage().await;
    let rs = fixtures::course(&storage, "rs-2026").await;
    let js = fixtures::course(&storage, "js-2026").await;
    let (_, student) = fixtures::student(&storage, rs.id, "octocat").await;

    let found = storage
        .get_student_by_github_id(rs.id, "octocat")
        .await
        .unwrap();
    assert_eq!(found.map(|s| s.id), Some(student.id));

    let other = storage
        .get_student_by_github_id(js.id, "octocat")
        .await
        .unwrap();
    assert!(other.is_none());
}

#[tokio::test]
async fn test_course_stats_count_active_members() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "stats").await;
    let (_, s1) = fixtures::student(&storage, course.id, "s1").await;
    fixtures::student(&storage, course.id, "s2").await;
    fixtures::student(&storage, course.id, "s3").await;
    storage.update_student_status(s1.id, true).await.unwrap();

    let mentor = fixtures::user(
        &storage,
        "mentor",
        crate::models::users::entities::UserRole::User,
    )
    .await;
    storage.add_mentor(course.id, mentor.id, 2).await.unwrap();

    let stats = storage.get_course_stats(course.id).await.unwrap();
    assert_eq!(stats.students_total_count, 3);
    assert_eq!(stats.students_active_count, 2);
    assert_eq!(stats.mentors_total_count, 1);
    assert_eq!(stats.mentors_active_count, 1);
}

#[tokio::test]
async fn test_save_task_solution_updates_in_place() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "sol").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    let (_, student) = fixtures::student(&storage, course.id, "s1").await;

    let first = storage
        .save_task_solution(student.id, task.id, "https://example.com/v1")
        .await
        .unwrap();
    let second = storage
        .save_task_solution(student.id, task.id, "https://example.com/v2")
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.url.as_deref(), Some("https://example.com/v2"));
}

#[tokio::test]
async fn test_distributed_solutions_are_excluded() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "dist").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    let (_, s1) = fixtures::student(&storage, course.id, "s1").await;
    let (_, s2) = fixtures::student(&storage, course.id, "s2").await;
    let sol1 = storage
        .save_task_solution(s1.id, task.id, "https://example.com/s1")
        .await
        .unwrap();
    storage
        .save_task_solution(s2.id, task.id, "https://example.com/s2")
        .await
        .unwrap();

    storage
        .create_task_solution_checkers(vec![NewTaskSolutionChecker {
            course_task_id: task.id,
            student_id: s1.id,
            checker_id: s2.id,
            task_solution_id: sol1.id,
        }])
        .await
        .unwrap();

    let pending = storage
        .get_task_solutions_without_checker(task.id)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].student_id, s2.id);
}

#[tokio::test]
async fn test_duplicate_checker_rows_roll_back_whole_batch() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "dup").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    let (_, s1) = fixtures::student(&storage, course.id, "s1").await;
    let (_, s2) = fixtures::student(&storage, course.id, "s2").await;
    let sol1 = storage
        .save_task_solution(s1.id, task.id, "https://example.com/s1")
        .await
        .unwrap();

    let row = NewTaskSolutionChecker {
        course_task_id: task.id,
        student_id: s1.id,
        checker_id: s2.id,
        task_solution_id: sol1.id,
    };
    let result = storage
        .create_task_solution_checkers(vec![row.clone(), row])
        .await;
    assert!(result.is_err());

    let assigned = storage
        .get_task_solution_checker(s1.id, s2.id, task.id)
        .await
        .unwrap();
    assert!(assigned.is_none());
}

#[tokio::test]
async fn test_result_history_appends() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "hist").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    let (_, s1) = fixtures::student(&storage, course.id, "s1").await;
    let (u2, s2) = fixtures::student(&storage, course.id, "s2").await;

    storage
        .save_task_solution_result(s1.id, s2.id, task.id, entry(8.0, "ok", u2.id))
        .await
        .unwrap();
    let latest = storage
        .save_task_solution_result(s1.id, s2.id, task.id, entry(9.0, "better", u2.id))
        .await
        .unwrap();

    assert_eq!(latest.score, 9.0);
    assert_eq!(latest.comment, "better");
    let scores: Vec<f64> = latest.historical_scores.iter().map(|h| h.score).collect();
    assert_eq!(scores, vec![8.0, 9.0]);

    let all = storage.list_task_solution_results(task.id).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_save_scores_writes_ledger_entries() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "ledger").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    let (_, s1) = fixtures::student(&storage, course.id, "s1").await;
    let (_, s2) = fixtures::student(&storage, course.id, "s2").await;

    let input = |score| ScoreInput {
        score,
        comment: "Cross-Check score".to_string(),
        author_id: SYSTEM_AUTHOR_ID,
    };
    let saved = storage
        .save_scores(task.id, vec![(s1.id, input(70.0)), (s2.id, input(85.0))])
        .await
        .unwrap();
    assert_eq!(saved, 2);

    // 再次写入追加历史
    let again = storage
        .save_score(s1.id, task.id, input(75.0))
        .await
        .unwrap();
    assert_eq!(again.score, 75.0);
    assert_eq!(again.historical_scores.len(), 2);
    assert_eq!(again.last_checker_id, Some(SYSTEM_AUTHOR_ID));
}

// 第一条历史记录的 score 被写成字符串，整段历史无法解析
const UNREADABLE_HISTORY: &str =
    r#"[{"score":"8","comment":"ok","author_id":1,"date_time":"2025-03-01T00:00:00Z"}]"#;

#[tokio::test]
async fn test_unreadable_result_history_blocks_further_scores() {
    let concrete = fixtures::memory_sea_orm().await;
    let storage: Arc<dyn Storage> = concrete.clone();
    let course = fixtures::course(&storage, "broken").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    let (_, s1) = fixtures::student(&storage, course.id, "s1").await;
    let (u2, s2) = fixtures::student(&storage, course.id, "s2").await;

    storage
        .save_task_solution_result(s1.id, s2.id, task.id, entry(8.0, "ok", u2.id))
        .await
        .unwrap();
    storage
        .save_task_solution_result(s1.id, s2.id, task.id, entry(9.0, "better", u2.id))
        .await
        .unwrap();

    let row = task_solution_results::Entity::find()
        .filter(task_solution_results::Column::StudentId.eq(s1.id))
        .one(&concrete.db)
        .await
        .unwrap()
        .unwrap();
    let mut active: task_solution_results::ActiveModel = row.into();
    active.historical_scores = Set(UNREADABLE_HISTORY.to_string());
    active.update(&concrete.db).await.unwrap();

    let saved = storage
        .save_task_solution_result(s1.id, s2.id, task.id, entry(10.0, "best", u2.id))
        .await;
    assert!(saved.is_err());
    assert!(
        storage
            .get_task_solution_result(s1.id, s2.id, task.id)
            .await
            .is_err()
    );

    let row = task_solution_results::Entity::find()
        .filter(task_solution_results::Column::StudentId.eq(s1.id))
        .one(&concrete.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.score, 9.0);
    assert_eq!(row.comment, "better");
    assert_eq!(row.historical_scores, UNREADABLE_HISTORY);
}

#[tokio::test]
async fn test_unreadable_ledger_history_blocks_further_scores() {
    let concrete = fixtures::memory_sea_orm().await;
    let storage: Arc<dyn Storage> = concrete.clone();
    let course = fixtures::course(&storage, "broken-ledger").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    let (_, s1) = fixtures::student(&storage, course.id, "s1").await;

    let input = |score| ScoreInput {
        score,
        comment: "Cross-Check score".to_string(),
        author_id: SYSTEM_AUTHOR_ID,
    };
    storage.save_score(s1.id, task.id, input(70.0)).await.unwrap();

    let row = task_results::Entity::find()
        .filter(task_results::Column::StudentId.eq(s1.id))
        .one(&concrete.db)
        .await
        .unwrap()
        .unwrap();
    let mut active: task_results::ActiveModel = row.into();
    active.historical_scores = Set(UNREADABLE_HISTORY.to_string());
    active.update(&concrete.db).await.unwrap();

    assert!(storage.save_score(s1.id, task.id, input(80.0)).await.is_err());
    assert!(storage.get_task_result(s1.id, task.id).await.is_err());

    let row = task_results::Entity::find()
        .filter(task_results::Column::StudentId.eq(s1.id))
        .one(&concrete.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.score, 70.0);
    assert_eq!(row.historical_scores, UNREADABLE_HISTORY);
}
