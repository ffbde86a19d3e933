use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 用户创建请求
//
// 服务层在写入存储之前会把 password 替换为 argon2 哈希
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub github_id: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
