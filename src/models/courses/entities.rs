use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 课程学籍
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct Student {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub mentor_id: Option<i64>,
    pub is_expelled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn is_active(&self) -> bool {
        !self.is_expelled
    }
}

/// 学生的公开信息（列表、互评分配中使用）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct StudentBasic {
    pub id: i64,
    pub github_id: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct Mentor {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub max_students: i32,
    pub is_expelled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct MentorBasic {
    pub id: i64,
    pub github_id: String,
    pub name: String,
    pub max_students: i32,
    pub is_active: bool,
}

// 课程统计（仪表盘"活跃学生"卡片使用）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct CourseStats {
    pub students_active_count: u64,
    pub students_total_count: u64,
    pub mentors_active_count: u64,
    pub mentors_total_count: u64,
}
