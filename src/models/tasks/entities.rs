use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/task.ts")]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 课程任务的评审方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/task.ts")]
pub enum CheckerMode {
    #[serde(rename = "mentor")]
    Mentor,
    #[serde(rename = "assigned")]
    Assigned,
    #[serde(rename = "taskOwner")]
    TaskOwner,
    #[serde(rename = "crossCheck")]
    CrossCheck,
    #[serde(rename = "auto-test")]
    AutoTest,
}

impl CheckerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckerMode::Mentor => "mentor",
            CheckerMode::Assigned => "assigned",
            CheckerMode::TaskOwner => "taskOwner",
            CheckerMode::CrossCheck => "crossCheck",
            CheckerMode::AutoTest => "auto-test",
        }
    }
}

impl std::fmt::Display for CheckerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mentor" => Ok(CheckerMode::Mentor),
            "assigned" => Ok(CheckerMode::Assigned),
            "taskOwner" => Ok(CheckerMode::TaskOwner),
            "crossCheck" => Ok(CheckerMode::CrossCheck),
            "auto-test" => Ok(CheckerMode::AutoTest),
            _ => Err(format!("Invalid checker mode: {s}")),
        }
    }
}

/// 挂在课程上的任务
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/task.ts")]
pub struct CourseTask {
    pub id: i64,
    pub course_id: i64,
    pub task_id: i64,
    pub checker: CheckerMode,
    /// 每份作业的评审人数，未设置时使用配置默认值
    pub pairs_count: Option<i32>,
    pub max_score: f64,
    pub score_weight: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl CourseTask {
    pub fn is_cross_check(&self) -> bool {
        self.checker == CheckerMode::CrossCheck
    }

    /// 配置的评审人数，负数视为 0
    pub fn pairs_count_or(&self, default: usize) -> usize {
        self.pairs_count
            .map(|n| n.max(0) as usize)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_mode_parse() {
        assert_eq!("crossCheck".parse::<CheckerMode>().unwrap(), CheckerMode::CrossCheck);
        assert_eq!("auto-test".parse::<CheckerMode>().unwrap(), CheckerMode::AutoTest);
        assert!("cross-check".parse::<CheckerMode>().is_err());
    }

    #[test]
    fn test_checker_mode_serde_names_match_as_str() {
        for mode in [
            CheckerMode::Mentor,
            CheckerMode::Assigned,
            CheckerMode::TaskOwner,
            CheckerMode::CrossCheck,
            CheckerMode::AutoTest,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
    }
}
