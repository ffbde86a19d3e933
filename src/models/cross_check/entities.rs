use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生提交的作业（每个学生在每个课程任务下最多一份）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct TaskSolution {
    pub id: i64,
    pub student_id: i64,
    pub course_task_id: i64,
    pub url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 互评分配：checker_id 评审 student_id 的作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct TaskSolutionChecker {
    pub id: i64,
    pub course_task_id: i64,
    pub student_id: i64,
    pub checker_id: i64,
    pub task_solution_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 配对算法的输出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct CrossCheckPair {
    pub checker_id: i64,
    pub student_id: i64,
}

/// 待写入的分配记录
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskSolutionChecker {
    pub course_task_id: i64,
    pub student_id: i64,
    pub checker_id: i64,
    pub task_solution_id: i64,
}

/// 一次评分的历史记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct HistoricalScore {
    pub score: f64,
    pub comment: String,
    pub author_id: i64,
    pub date_time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/cross_check.ts")]
pub struct TaskSolutionResult {
    pub id: i64,
    pub student_id: i64,
    pub checker_id: i64,
    pub course_task_id: i64,
    pub score: f64,
    pub comment: String,
    pub historical_scores: Vec<HistoricalScore>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
