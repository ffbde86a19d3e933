use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::cross_check::requests::{
    CourseTaskPath, CrossCheckResultRequest, SaveSolutionRequest, StudentTaskPath,
};
use crate::services::CrossCheckService;

// 懒加载的全局 CROSS_CHECK_SERVICE 实例
static CROSS_CHECK_SERVICE: Lazy<CrossCheckService> = Lazy::new(CrossCheckService::new_lazy);

pub async fn save_solution(
    req: HttpRequest,
    path: web::Path<StudentTaskPath>,
    data: web::Json<SaveSolutionRequest>,
) -> ActixResult<HttpResponse> {
    CROSS_CHECK_SERVICE
        .save_solution(path.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn create_distribution(
    req: HttpRequest,
    path: web::Path<CourseTaskPath>,
) -> ActixResult<HttpResponse> {
    CROSS_CHECK_SERVICE
        .create_distribution(path.into_inner(), &req)
        .await
}

pub async fn save_result(
    req: HttpRequest,
    path: web::Path<StudentTaskPath>,
    data: web::Json<CrossCheckResultRequest>,
) -> ActixResult<HttpResponse> {
    CROSS_CHECK_SERVICE
        .save_result(path.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn get_result(
    req: HttpRequest,
    path: web::Path<StudentTaskPath>,
) -> ActixResult<HttpResponse> {
    CROSS_CHECK_SERVICE.get_result(path.into_inner(), &req).await
}

pub async fn get_assignments(
    req: HttpRequest,
    path: web::Path<StudentTaskPath>,
) -> ActixResult<HttpResponse> {
    CROSS_CHECK_SERVICE
        .get_assignments(path.into_inner(), &req)
        .await
}

pub async fn create_completion(
    req: HttpRequest,
    path: web::Path<CourseTaskPath>,
) -> ActixResult<HttpResponse> {
    CROSS_CHECK_SERVICE
        .create_completion(path.into_inner(), &req)
        .await
}

pub async fn get_feedback(
    req: HttpRequest,
    path: web::Path<StudentTaskPath>,
) -> ActixResult<HttpResponse> {
    CROSS_CHECK_SERVICE.get_feedback(path.into_inner(), &req).await
}

// 挂在 /api/v1/courses 下
pub fn configure_cross_check_routes(cfg: &mut web::ServiceConfig) {
    const TASK: &str = "/{course_id}/tasks/{course_task_id}/cross-check";
    const STUDENT: &str = "/{course_id}/tasks/{course_task_id}/students/{github_id}/cross-check";

    cfg.route(
        &format!("{TASK}/distribution"),
        web::post().to(create_distribution),
    )
    .route(
        &format!("{TASK}/completion"),
        web::post().to(create_completion),
    )
    .route(
        &format!("{STUDENT}/solution"),
        web::post().to(save_solution),
    )
    .service(
        web::resource(format!("{STUDENT}/result"))
            .route(web::get().to(get_result))
            .route(web::post().to(save_result)),
    )
    .route(
        &format!("{STUDENT}/assignments"),
        web::get().to(get_assignments),
    )
    .route(&format!("{STUDENT}/feedback"), web::get().to(get_feedback));
}
