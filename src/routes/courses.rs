use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{cross_check, tasks};
use crate::middlewares;
use crate::models::courses::requests::{
    AddMentorRequest, CourseListParams, CreateCourseRequest, EnrollStudentRequest,
    UpdateStudentStatusRequest,
};
use crate::services::CourseService;

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn get_course(req: HttpRequest, course_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.into_inner(), &req).await
}

pub async fn get_course_stats(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_stats(course_id.into_inner(), &req).await
}

pub async fn list_students(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_students(course_id.into_inner(), &req)
        .await
}

pub async fn enroll_student(
    req: HttpRequest,
    course_id: web::Path<i64>,
    data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .enroll_student(course_id.into_inner(), data.into_inner(), &req)
        .await
}

pub async fn update_student_status(
    req: HttpRequest,
    path: web::Path<(i64, String)>,
    data: web::Json<UpdateStudentStatusRequest>,
) -> ActixResult<HttpResponse> {
    let (course_id, github_id) = path.into_inner();
    COURSE_SERVICE
        .update_student_status(course_id, github_id, data.into_inner(), &req)
        .await
}

pub async fn list_mentors(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_mentors(course_id.into_inner(), &req)
        .await
}

pub async fn add_mentor(
    req: HttpRequest,
    course_id: web::Path<i64>,
    data: web::Json<AddMentorRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .add_mentor(course_id.into_inner(), data.into_inner(), &req)
        .await
}

// 配置路由
//
// 课程任务与互评路由挂在同一个 scope 下，写操作的管理员校验在服务层完成
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .route("/{course_id}", web::get().to(get_course))
            .route("/{course_id}/stats", web::get().to(get_course_stats))
            .service(
                web::resource("/{course_id}/students")
                    .route(web::get().to(list_students))
                    .route(web::post().to(enroll_student)),
            )
            .route(
                "/{course_id}/students/{github_id}/status",
                web::put().to(update_student_status),
            )
            .service(
                web::resource("/{course_id}/mentors")
                    .route(web::get().to(list_mentors))
                    .route(web::post().to(add_mentor)),
            )
            .configure(tasks::configure_course_task_routes)
            .configure(cross_check::configure_cross_check_routes),
    );
}
