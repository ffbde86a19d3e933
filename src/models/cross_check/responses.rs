use serde::Serialize;
use ts_rs::TS;

use super::entities::TaskSolutionChecker;
use crate::models::courses::entities::StudentBasic;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct DistributionResponse {
    pub cross_check_pairs: Vec<TaskSolutionChecker>,
}

/// 待评审的作业
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct AssignmentItem {
    pub student: StudentBasic,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct FeedbackComment {
    pub comment: String,
}

// 收到的评语，不包含评审人信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct FeedbackResponse {
    pub url: Option<String>,
    pub comments: Vec<FeedbackComment>,
}

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct StudentScore {
    pub student_id: i64,
    pub score: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct CompletionResponse {
    pub saved_count: usize,
    pub scores: Vec<StudentScore>,
}
