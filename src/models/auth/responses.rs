use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// 当前会话用户
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/auth.ts")]
pub struct SessionResponse {
    pub id: i64,
    pub github_id: String,
    pub display_name: String,
    pub is_admin: bool,
}
