use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{ApiResponse, auth::SessionResponse, users::entities::User};
use crate::services::session_user;
use crate::utils::error_response;

impl From<&User> for SessionResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            github_id: user.github_id.clone(),
            display_name: user.display_name(),
            is_admin: user.is_admin(),
        }
    }
}

pub async fn handle_session(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match session_user(request) {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SessionResponse::from(&user),
            "Success",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
