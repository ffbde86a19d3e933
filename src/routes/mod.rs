pub mod auth;

pub mod users;

pub mod courses;

pub mod tasks;

pub mod cross_check;

pub mod dashboard;

pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use tasks::configure_task_routes;
pub use users::configure_user_routes;
