pub mod course_tasks;
pub mod create;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::tasks::requests::{CreateCourseTaskRequest, CreateTaskRequest};
use crate::storage::Storage;

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
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

    // 创建任务
    pub async fn create_task(
        &self,
        req: CreateTaskRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_task(self, req, request).await
    }

    // 把任务加入课程
    pub async fn create_course_task(
        &self,
        course_id: i64,
        req: CreateCourseTaskRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        course_tasks::handle_create_course_task(self, course_id, req, request).await
    }

    pub async fn list_course_tasks(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        course_tasks::handle_list_course_tasks(self, course_id, request).await
    }
}
