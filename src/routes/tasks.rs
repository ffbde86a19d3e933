use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::tasks::requests::{CreateCourseTaskRequest, CreateTaskRequest};
use crate::models::users::entities::UserRole;
use crate::services::TaskService;

// 懒加载的全局 TASK_SERVICE 实例
static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

pub async fn create_task(
    req: HttpRequest,
    task_data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.create_task(task_data.into_inner(), &req).await
}

pub async fn list_course_tasks(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .list_course_tasks(course_id.into_inner(), &req)
        .await
}

pub async fn create_course_task(
    req: HttpRequest,
    course_id: web::Path<i64>,
    data: web::Json<CreateCourseTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .create_course_task(course_id.into_inner(), data.into_inner(), &req)
        .await
}

// 任务库，仅管理员可用
pub fn configure_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_task)),
            ),
    );
}

// 挂在 /api/v1/courses 下
pub fn configure_course_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/tasks")
            .route(web::get().to(list_course_tasks))
            .route(web::post().to(create_course_task)),
    );
}
