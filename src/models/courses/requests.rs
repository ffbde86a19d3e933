use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub alias: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

/// 存储层查询参数
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
}

impl From<CourseListParams> for CourseListQuery {
    fn from(params: CourseListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            search: params.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct EnrollStudentRequest {
    pub github_id: String,
    pub mentor_github_id: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct UpdateStudentStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct AddMentorRequest {
    pub github_id: String,
    pub max_students: Option<i32>,
}
