pub mod auth;
pub mod courses;
pub mod cross_check;
pub mod tasks;
pub mod users;

pub use auth::AuthService;
pub use courses::CourseService;
pub use cross_check::CrossCheckService;
pub use tasks::TaskService;
pub use users::UserService;

use actix_web::HttpRequest;

use crate::errors::{CourseAppError, Result};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;

/// 当前会话用户
pub(crate) fn session_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user(request)
        .ok_or_else(|| CourseAppError::authentication("Unauthorized access, please login"))
}

pub(crate) fn require_admin(user: &User) -> Result<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(CourseAppError::authorization("Admin access required"))
    }
}
