use super::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 用户响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}
