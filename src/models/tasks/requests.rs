use serde::Deserialize;
use ts_rs::TS;

use super::entities::CheckerMode;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/task.ts")]
pub struct CreateTaskRequest {
    pub name: String,
    pub description_url: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/task.ts")]
pub struct CreateCourseTaskRequest {
    pub task_id: i64,
    pub checker: CheckerMode,
    pub pairs_count: Option<i32>,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    #[serde(default = "default_score_weight")]
    pub score_weight: f64,
}

fn default_max_score() -> f64 {
    100.0
}

fn default_score_weight() -> f64 {
    1.0
}
