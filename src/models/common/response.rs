use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// 无负载的成功响应，序列化为 `{}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/api.ts")]
pub struct EmptyObject {}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<EmptyObject> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::success(EmptyObject::default(), message)
    }
}

impl ApiResponse<()> {
    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_empty_serializes_empty_object() {
        let json = serde_json::to_value(ApiResponse::success_empty("ok")).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], serde_json::json!({}));
    }

    #[test]
    fn test_error_has_message_and_no_data() {
        let resp = ApiResponse::error_empty(ErrorCode::CrossCheckNotAssigned, "no assigned cross-check");
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["message"], "no assigned cross-check");
        assert_eq!(json["code"], ErrorCode::CrossCheckNotAssigned as i32);
        assert!(json.get("data").is_none());
    }
}
