use serde::Deserialize;
use ts_rs::TS;

// 用户登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或 GitHub ID
    pub login: String,
    pub password: String,
}
