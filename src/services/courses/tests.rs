use std::sync::Arc;

use super::{create, mentors, stats, students};
use crate::cache::{ObjectCache, object_cache::moka::MokaCacheWrapper};
use crate::errors::CourseAppError;
use crate::models::{
    courses::requests::{
        AddMentorRequest, CreateCourseRequest, EnrollStudentRequest, UpdateStudentStatusRequest,
    },
    users::entities::UserRole,
};
use crate::storage::sea_orm_storage::fixtures;

fn enroll(github_id: &str) -> EnrollStudentRequest {
    EnrollStudentRequest {
        github_id: github_id.to_string(),
        mentor_github_id: None,
    }
}

#[tokio::test]
async fn test_only_admins_create_courses() {
    let storage = fixtures::memory_storage().await;
    let admin = fixtures::user(&storage, "admin", UserRole::Admin).await;
    let student = fixtures::user(&storage, "learner", UserRole::User).await;
    let req = || CreateCourseRequest {
        name: "Rust 2026".to_string(),
        alias: "rust-2026".to_string(),
        description: None,
    };

    let err = create::create_course(storage.as_ref(), &student, req())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAppError::Authorization(_)));

    let course = create::create_course(storage.as_ref(), &admin, req())
        .await
        .unwrap();
    assert_eq!(course.alias, "rust-2026");

    let err = create::create_course(storage.as_ref(), &admin, req())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAppError::Conflict(_)));
}

#[tokio::test]
async fn test_enroll_with_mentor_and_reject_duplicates() {
    let storage = fixtures::memory_storage().await;
    let admin = fixtures::user(&storage, "admin", UserRole::Admin).await;
    let course = fixtures::course(&storage, "js-2026").await;
    fixtures::user(&storage, "mentor", UserRole::User).await;
    fixtures::user(&storage, "octocat", UserRole::User).await;

    mentors::add_mentor(
        storage.as_ref(),
        None,
        &admin,
        course.id,
        AddMentorRequest {
            github_id: "mentor".to_string(),
            max_students: None,
        },
    )
    .await
    .unwrap();

    let student = students::enroll_student(
        storage.as_ref(),
        None,
        &admin,
        course.id,
        EnrollStudentRequest {
            github_id: "octocat".to_string(),
            mentor_github_id: Some("mentor".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(student.mentor_id.is_some());

    let err = students::enroll_student(storage.as_ref(), None, &admin, course.id, enroll("octocat"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAppError::Conflict(_)));

    let err = students::enroll_student(storage.as_ref(), None, &admin, course.id, enroll("nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAppError::NotFound(_)));
}

#[tokio::test]
async fn test_stats_cache_is_invalidated_on_status_change() {
    let storage = fixtures::memory_storage().await;
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(16, 60));
    let admin = fixtures::user(&storage, "admin", UserRole::Admin).await;
    let course = fixtures::course(&storage, "stats").await;
    for github_id in ["s1", "s2"] {
        fixtures::user(&storage, github_id, UserRole::User).await;
        students::enroll_student(
            storage.as_ref(),
            Some(cache.as_ref()),
            &admin,
            course.id,
            enroll(github_id),
        )
        .await
        .unwrap();
    }

    let before = stats::get_course_stats(storage.as_ref(), Some(cache.as_ref()), course.id)
        .await
        .unwrap();
    assert_eq!(before.students_active_count, 2);
    assert_eq!(before.students_total_count, 2);

    students::update_student_status(
        storage.as_ref(),
        Some(cache.as_ref()),
        &admin,
        course.id,
        "s1",
        UpdateStudentStatusRequest { is_active: false },
    )
    .await
    .unwrap();

    let after = stats::get_course_stats(storage.as_ref(), Some(cache.as_ref()), course.id)
        .await
        .unwrap();
    assert_eq!(after.students_active_count, 1);
    assert_eq!(after.students_total_count, 2);
}

#[tokio::test]
async fn test_stats_for_unknown_course() {
    let storage = fixtures::memory_storage().await;
    let err = stats::get_course_stats(storage.as_ref(), None, 404)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseAppError::NotFound(_)));
}
