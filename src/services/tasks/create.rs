use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::errors::{CourseAppError, Result};
use crate::models::{
    ApiResponse,
    tasks::{entities::Task, requests::CreateTaskRequest},
};
use crate::storage::Storage;
use crate::utils::{error_response, validate::validate_solution_url};

pub async fn create_task(storage: &dyn Storage, mut req: CreateTaskRequest) -> Result<Task> {
    req.name = req.name.trim().to_string();
    if req.name.is_empty() {
        return Err(CourseAppError::validation("Task name is required"));
    }
    // 空字符串视为未提供
    req.description_url = req.description_url.filter(|url| !url.trim().is_empty());
    if let Some(url) = &req.description_url {
        validate_solution_url(url).map_err(|_| {
            CourseAppError::validation("Task description url must be an http(s) address")
        })?;
    }

    storage.create_task(req).await
}

pub async fn handle_create_task(
    service: &TaskService,
    req: CreateTaskRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create_task(storage.as_ref(), req).await {
        Ok(task) => {
            tracing::info!("Task {} created: {}", task.id, task.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(task, "Task created")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
