use serde::Serialize;
use ts_rs::TS;

use super::entities::{MentorBasic, StudentBasic};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct StudentListResponse {
    pub items: Vec<StudentBasic>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/course.ts")]
pub struct MentorListResponse {
    pub items: Vec<MentorBasic>,
}
