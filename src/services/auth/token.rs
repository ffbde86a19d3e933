use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

fn unauthorized(message: &str) -> HttpResponse {
    // 清除无效的 refresh token cookie
    HttpResponse::Unauthorized()
        .cookie(jwt::JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let claims = match jwt::JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(unauthorized("Login expired or invalid, please login again"));
        }
    };

    // 用户可能已被删除，按数据库中的当前角色签发
    let storage = service.get_storage(request);
    let user = match claims.user_id() {
        Some(user_id) => storage.get_user_by_id(user_id).await,
        None => Ok(None),
    };

    match user {
        Ok(Some(user)) => {
            match jwt::JwtUtils::generate_access_token(user.id, &user.role.to_string()) {
                Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    RefreshTokenResponse {
                        access_token,
                        expires_in: config.jwt.access_token_expiry * 60,
                    },
                    "Token refreshed successfully",
                ))),
                Err(e) => {
                    tracing::error!("Failed to generate access token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Unable to generate token",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(unauthorized("Login expired or invalid, please login again")),
        Err(e) => {
            tracing::error!("Refresh token user lookup failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Token refresh failed: {e}"),
                )),
            )
        }
    }
}
