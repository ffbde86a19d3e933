pub mod auth;
pub mod common;
pub mod courses;
pub mod cross_check;
pub mod task_results;
pub mod tasks;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::{Deserialize, Serialize};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 响应体中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,

    // 用户
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserGithubIdInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserCreationFailed = 3005,

    // 课程、学生、导师
    CourseNotFound = 4000,
    CourseAlreadyExists = 4001,
    CourseCreationFailed = 4002,
    StudentNotFound = 4100,
    StudentAlreadyEnrolled = 4101,
    MentorNotFound = 4200,
    MentorAlreadyExists = 4201,

    // 任务
    TaskNotFound = 5000,
    CourseTaskNotFound = 5001,
    CourseTaskInvalid = 5002,

    // 互评
    CrossCheckInvalidReference = 6000,
    CrossCheckNotSupported = 6001,
    CrossCheckNotAssigned = 6002,
    CrossCheckScoreInvalid = 6003,
}
