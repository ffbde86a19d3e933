use serde_json::json;
use std::sync::Arc;

use super::{assignments, completion, distribution, feedback, result, solution};
use crate::errors::CourseAppError;
use crate::models::{
    courses::entities::Course,
    cross_check::requests::{CrossCheckResultRequest, SaveSolutionRequest, StudentTaskPath},
    task_results::entities::SYSTEM_AUTHOR_ID,
    tasks::entities::{CheckerMode, CourseTask},
    users::entities::{User, UserRole},
};
use crate::storage::{Storage, sea_orm_storage::fixtures};

fn path(course: &Course, task: &CourseTask, github_id: &str) -> StudentTaskPath {
    StudentTaskPath {
        course_id: course.id,
        course_task_id: task.id,
        github_id: github_id.to_string(),
    }
}

fn score(value: serde_json::Value, comment: &str) -> CrossCheckResultRequest {
    CrossCheckResultRequest {
        score: Some(value),
        comment: Some(comment.to_string()),
    }
}

async fn submit(storage: &Arc<dyn Storage>, course: &Course, task: &CourseTask, user: &User) {
    solution::save_solution(
        storage.as_ref(),
        &path(course, task, &user.github_id),
        user,
        SaveSolutionRequest {
            url: format!("https://github.com/{}/solution", user.github_id),
        },
    )
    .await
    .unwrap();
}

/// 两名学生互相评审的课程任务
async fn paired_setup() -> (Arc<dyn Storage>, Course, CourseTask, User, User) {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "rs-2026").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, Some(1)).await;
    let (alice, _) = fixtures::student(&storage, course.id, "alice").await;
    let (bob, _) = fixtures::student(&storage, course.id, "bob").await;

    submit(&storage, &course, &task, &alice).await;
    submit(&storage, &course, &task, &bob).await;
    let distributed = distribution::distribute(storage.as_ref(), course.id, task.id, 4)
        .await
        .unwrap();
    assert_eq!(distributed.cross_check_pairs.len(), 2);

    (storage, course, task, alice, bob)
}

#[tokio::test]
async fn test_distribution_assigns_each_solution_once() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "dist").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::CrossCheck, None).await;
    for github_id in ["s1", "s2", "s3", "s4"] {
        let (user, _) = fixtures::student(&storage, course.id, github_id).await;
        submit(&storage, &course, &task, &user).await;
    }

    let first = distribution::distribute(storage.as_ref(), course.id, task.id, 4)
        .await
        .unwrap();
    assert_eq!(first.cross_check_pairs.len(), 12);
    assert!(
        first
            .cross_check_pairs
            .iter()
            .all(|p| p.checker_id != p.student_id)
    );

    let second = distribution::distribute(storage.as_ref(), course.id, task.id, 4)
        .await
        .unwrap();
    assert!(second.cross_check_pairs.is_empty());
}

#[tokio::test]
async fn test_scoring_twice_keeps_one_record_with_history() {
    let (storage, course, task, alice, bob) = paired_setup().await;
    let bob_path = path(&course, &task, &bob.github_id);

    result::save_result(storage.as_ref(), &bob_path, &alice, score(json!(60), "needs work"))
        .await
        .unwrap();
    result::save_result(storage.as_ref(), &bob_path, &alice, score(json!("75"), "better"))
        .await
        .unwrap();

    let current = result::get_result(storage.as_ref(), &bob_path, &alice)
        .await
        .unwrap()
        .expect("result exists");
    assert_eq!(current.score, 75.0);
    assert_eq!(current.comment, "better");
    let history: Vec<(f64, &str, i64)> = current
        .historical_scores
        .iter()
        .map(|h| (h.score, h.comment.as_str(), h.author_id))
        .collect();
    assert_eq!(
        history,
        vec![(60.0, "needs work", alice.id), (75.0, "better", alice.id)]
    );
    assert!(current.historical_scores[0].date_time <= current.historical_scores[1].date_time);

    let all = storage.list_task_solution_results(task.id).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_missing_comment_is_saved_as_empty() {
    let (storage, course, task, alice, bob) = paired_setup().await;
    let bob_path = path(&course, &task, &bob.github_id);

    let req = CrossCheckResultRequest {
        score: Some(json!(5)),
        comment: None,
    };
    result::save_result(storage.as_ref(), &bob_path, &alice, req)
        .await
        .unwrap();

    let current = result::get_result(storage.as_ref(), &bob_path, &alice)
        .await
        .unwrap()
        .expect("result exists");
    assert_eq!(current.comment, "");
    assert_eq!(current.historical_scores[0].comment, "");
}

#[tokio::test]
async fn test_invalid_score_creates_no_record() {
    let (storage, course, task, alice, bob) = paired_setup().await;
    let bob_path = path(&course, &task, &bob.github_id);

    for value in [json!(-1), json!("ten")] {
        let err = result::save_result(storage.as_ref(), &bob_path, &alice, score(value, ""))
            .await
            .unwrap_err();
        assert_eq!(err, CourseAppError::validation("no score provided"));
    }

    let current = result::get_result(storage.as_ref(), &bob_path, &alice)
        .await
        .unwrap();
    assert!(current.is_none());
}

#[tokio::test]
async fn test_scoring_without_assignment_is_rejected() {
    let (storage, course, task, alice, _) = paired_setup().await;
    let (carol, _) = fixtures::student(&storage, course.id, "carol").await;

    let err = result::save_result(
        storage.as_ref(),
        &path(&course, &task, &alice.github_id),
        &carol,
        score(json!(90), ""),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseAppError::MissingAssignment(_)));
}

#[tokio::test]
async fn test_non_cross_check_task_is_not_supported() {
    let storage = fixtures::memory_storage().await;
    let course = fixtures::course(&storage, "mentor-only").await;
    let task = fixtures::course_task(&storage, course.id, CheckerMode::Mentor, None).await;
    let (alice, _) = fixtures::student(&storage, course.id, "alice").await;

    let err = assignments::get_assignments(
        storage.as_ref(),
        &path(&course, &task, "alice"),
        &alice,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseAppError::UnsupportedOperation(_)));

    let err = distribution::distribute(storage.as_ref(), course.id, task.id, 4)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAppError::UnsupportedOperation(_)));
}

#[tokio::test]
async fn test_unknown_student_is_invalid_reference() {
    let (storage, course, task, alice, _) = paired_setup().await;

    let err = result::save_result(
        storage.as_ref(),
        &path(&course, &task, "ghost"),
        &alice,
        score(json!(10), ""),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseAppError::InvalidReference(_)));

    // 课程任务不属于该课程
    let other = fixtures::course(&storage, "other").await;
    let err = distribution::distribute(storage.as_ref(), other.id, task.id, 4)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAppError::InvalidReference(_)));
}

#[tokio::test]
async fn test_students_cannot_act_for_each_other() {
    let (storage, course, task, alice, bob) = paired_setup().await;

    let err = solution::save_solution(
        storage.as_ref(),
        &path(&course, &task, &bob.github_id),
        &alice,
        SaveSolutionRequest {
            url: "https://github.com/alice/fake".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseAppError::Authorization(_)));

    let admin = fixtures::user(&storage, "instructor", UserRole::Admin).await;
    let items = assignments::get_assignments(
        storage.as_ref(),
        &path(&course, &task, &bob.github_id),
        &admin,
    )
    .await
    .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].student.github_id, "alice");
    assert_eq!(
        items[0].url.as_deref(),
        Some("https://github.com/alice/solution")
    );
}

#[tokio::test]
async fn test_feedback_hides_reviewers() {
    let (storage, course, task, alice, bob) = paired_setup().await;
    result::save_result(
        storage.as_ref(),
        &path(&course, &task, &bob.github_id),
        &alice,
        score(json!(88), "clean code"),
    )
    .await
    .unwrap();

    let feedback = feedback::get_feedback(
        storage.as_ref(),
        &path(&course, &task, &bob.github_id),
        &bob,
    )
    .await
    .unwrap();
    assert_eq!(
        feedback.url.as_deref(),
        Some("https://github.com/bob/solution")
    );
    assert_eq!(feedback.comments.len(), 1);
    assert_eq!(feedback.comments[0].comment, "clean code");

    let json = serde_json::to_value(&feedback).unwrap();
    assert!(json["comments"][0].get("checker_id").is_none());
}

#[tokio::test]
async fn test_completion_writes_system_ledger_entries() {
    let (storage, course, task, alice, bob) = paired_setup().await;
    result::save_result(
        storage.as_ref(),
        &path(&course, &task, &bob.github_id),
        &alice,
        score(json!(70.4), ""),
    )
    .await
    .unwrap();
    result::save_result(
        storage.as_ref(),
        &path(&course, &task, &alice.github_id),
        &bob,
        score(json!(90.6), ""),
    )
    .await
    .unwrap();

    let response = completion::complete(storage.as_ref(), course.id, task.id, 3)
        .await
        .unwrap();
    assert_eq!(response.saved_count, 2);

    let alice_student = storage
        .get_student_by_user_id(course.id, alice.id)
        .await
        .unwrap()
        .unwrap();
    let ledger = storage
        .get_task_result(alice_student.id, task.id)
        .await
        .unwrap()
        .expect("ledger entry");
    assert_eq!(ledger.score, 91.0);
    assert_eq!(ledger.comment.as_deref(), Some(completion::CROSS_CHECK_SCORE_COMMENT));
    assert_eq!(ledger.last_checker_id, Some(SYSTEM_AUTHOR_ID));
    assert_eq!(ledger.historical_scores.len(), 1);
    assert_eq!(ledger.historical_scores[0].author_id, SYSTEM_AUTHOR_ID);
}
