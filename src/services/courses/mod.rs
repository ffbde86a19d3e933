//! 课程、学生与导师

pub mod create;
pub mod get;
pub mod list;
pub mod mentors;
pub mod stats;
pub mod students;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{CourseAppError, Result};
use crate::models::courses::{
    entities::Course,
    requests::{
        AddMentorRequest, CourseListParams, CreateCourseRequest, EnrollStudentRequest,
        UpdateStudentStatusRequest,
    },
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|data| data.get_ref().clone())
    }

    // 创建课程
    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_course(self, req, request).await
    }

    // 课程列表
    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_courses(self, query, request).await
    }

    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_course(self, course_id, request).await
    }

    // 仪表盘统计
    pub async fn get_stats(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::handle_get_stats(self, course_id, request).await
    }

    // 学生
    pub async fn enroll_student(
        &self,
        course_id: i64,
        req: EnrollStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_enroll_student(self, course_id, req, request).await
    }

    pub async fn list_students(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_list_students(self, course_id, request).await
    }

    pub async fn update_student_status(
        &self,
        course_id: i64,
        github_id: String,
        req: UpdateStudentStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_update_student_status(self, course_id, github_id, req, request).await
    }

    // 导师
    pub async fn add_mentor(
        &self,
        course_id: i64,
        req: AddMentorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mentors::handle_add_mentor(self, course_id, req, request).await
    }

    pub async fn list_mentors(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mentors::handle_list_mentors(self, course_id, request).await
    }
}

pub(crate) async fn load_course(storage: &dyn Storage, course_id: i64) -> Result<Course> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| CourseAppError::not_found(format!("Course {course_id} not found")))
}

pub(crate) async fn load_user_by_github_id(storage: &dyn Storage, github_id: &str) -> Result<User> {
    storage
        .get_user_by_github_id(github_id)
        .await?
        .ok_or_else(|| CourseAppError::not_found(format!("User {github_id} not found")))
}
