use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::cross_check::entities::HistoricalScore;

/// 系统写入成绩时使用的作者 ID
pub const SYSTEM_AUTHOR_ID: i64 = -1;

/// 学生在课程任务上的总成绩（成绩总表）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/task_result.ts")]
pub struct TaskResult {
    pub id: i64,
    pub student_id: i64,
    pub course_task_id: i64,
    pub score: f64,
    pub comment: Option<String>,
    pub last_checker_id: Option<i64>,
    pub historical_scores: Vec<HistoricalScore>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInput {
    pub score: f64,
    pub comment: String,
    pub author_id: i64,
}
