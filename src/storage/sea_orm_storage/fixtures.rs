//! 测试用的内存数据库与数据构造

use std::sync::Arc;

use super::SeaOrmStorage;
use crate::models::{
    courses::{
        entities::{Course, Student},
        requests::CreateCourseRequest,
    },
    tasks::{
        entities::{CheckerMode, CourseTask},
        requests::{CreateCourseTaskRequest, CreateTaskRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::Storage;

pub(crate) async fn memory_storage() -> Arc<dyn Storage> {
    memory_sea_orm().await
}

/// 需要直接操作表的测试使用具体类型
pub(crate) async fn memory_sea_orm() -> Arc<SeaOrmStorage> {
    Arc::new(
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory sqlite"),
    )
}

pub(crate) async fn user(storage: &Arc<dyn Storage>, github_id: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: github_id.to_string(),
            github_id: github_id.to_string(),
            password: "not-a-real-hash".to_string(),
            role: Some(role),
            first_name: None,
            last_name: None,
        })
        .await
        .expect("create user")
}

pub(crate) async fn course(storage: &Arc<dyn Storage>, alias: &str) -> Course {
    storage
        .create_course(CreateCourseRequest {
            name: format!("Course {alias}"),
            alias: alias.to_string(),
            description: None,
        })
        .await
        .expect("create course")
}

/// 创建用户并加入课程
pub(crate) async fn student(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    github_id: &str,
) -> (User, Student) {
    let user = user(storage, github_id, UserRole::User).await;
    let student = storage
        .enroll_student(course_id, user.id, None)
        .await
        .expect("enroll student");
    (user, student)
}

pub(crate) async fn course_task(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    checker: CheckerMode,
    pairs_count: Option<i32>,
) -> CourseTask {
    let task = storage
        .create_task(CreateTaskRequest {
            name: "Songbird".to_string(),
            description_url: Some("https://example.com/songbird".to_string()),
        })
        .await
        .expect("create task");
    storage
        .create_course_task(
            course_id,
            CreateCourseTaskRequest {
                task_id: task.id,
                checker,
                pairs_count,
                max_score: 100.0,
                score_weight: 1.0,
            },
        )
        .await
        .expect("create course task")
}
