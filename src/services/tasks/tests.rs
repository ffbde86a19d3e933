use super::{course_tasks, create};
use crate::errors::CourseAppError;
use crate::models::{
    tasks::{
        entities::CheckerMode,
        requests::{CreateCourseTaskRequest, CreateTaskRequest},
    },
    users::entities::UserRole,
};
use crate::storage::sea_orm_storage::fixtures;

fn course_task_request(task_id: i64, pairs_count: Option<i32>) -> CreateCourseTaskRequest {
    CreateCourseTaskRequest {
        task_id,
        checker: CheckerMode::CrossCheck,
        pairs_count,
        max_score: 100.0,
        score_weight: 1.0,
    }
}

#[tokio::test]
async fn test_create_course_task_checks_references() {
    let storage = fixtures::memory_storage().await;
    let admin = fixtures::user(&storage, "admin", UserRole::Admin).await;
    let course = fixtures::course(&storage, "tasks").await;
    let task = create::create_task(
        storage.as_ref(),
        CreateTaskRequest {
            name: " Songbird ".to_string(),
            description_url: Some(String::new()),
        },
    )
    .await
    .unwrap();
    assert_eq!(task.name, "Songbird");
    assert!(task.description_url.is_none());

    let err = course_tasks::create_course_task(
        storage.as_ref(),
        &admin,
        course.id,
        course_task_request(task.id + 100, None),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseAppError::InvalidReference(_)));

    let err = course_tasks::create_course_task(
        storage.as_ref(),
        &admin,
        course.id,
        course_task_request(task.id, Some(0)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseAppError::Validation(_)));

    let course_task = course_tasks::create_course_task(
        storage.as_ref(),
        &admin,
        course.id,
        course_task_request(task.id, Some(3)),
    )
    .await
    .unwrap();
    assert!(course_task.is_cross_check());
    assert_eq!(course_task.pairs_count_or(4), 3);

    let listed = storage.list_course_tasks(course.id).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_students_cannot_create_course_tasks() {
    let storage = fixtures::memory_storage().await;
    let user = fixtures::user(&storage, "learner", UserRole::User).await;
    let course = fixtures::course(&storage, "tasks").await;

    let err = course_tasks::create_course_task(
        storage.as_ref(),
        &user,
        course.id,
        course_task_request(1, None),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CourseAppError::Authorization(_)));
}
