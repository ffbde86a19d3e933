use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct SaveSolutionRequest {
    pub url: String,
}

/// 评分请求
///
/// score 接受数字或数字字符串，解析在服务层完成
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct CrossCheckResultRequest {
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub score: Option<serde_json::Value>,
    /// 缺省或 null 时按空评语处理
    #[serde(default)]
    pub comment: Option<String>,
}

/// `/courses/{course_id}/tasks/{course_task_id}/cross-check/...`
#[derive(Debug, Deserialize)]
pub struct CourseTaskPath {
    pub course_id: i64,
    pub course_task_id: i64,
}

/// `/courses/{course_id}/tasks/{course_task_id}/students/{github_id}/cross-check/...`
#[derive(Debug, Deserialize)]
pub struct StudentTaskPath {
    pub course_id: i64,
    pub course_task_id: i64,
    pub github_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_request_accepts_null_comment() {
        let req: CrossCheckResultRequest =
            serde_json::from_str(r#"{"score": 7, "comment": null}"#).unwrap();
        assert_eq!(req.comment, None);

        let req: CrossCheckResultRequest = serde_json::from_str(r#"{"score": "7"}"#).unwrap();
        assert_eq!(req.comment, None);

        let req: CrossCheckResultRequest =
            serde_json::from_str(r#"{"score": 7, "comment": "fine"}"#).unwrap();
        assert_eq!(req.comment.as_deref(), Some("fine"));
    }
}
