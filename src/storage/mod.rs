use crate::models::{
    PaginatedResponse,
    courses::{
        entities::{Course, CourseStats, Mentor, MentorBasic, Student, StudentBasic},
        requests::{CourseListQuery, CreateCourseRequest},
    },
    cross_check::{
        entities::{
            HistoricalScore, NewTaskSolutionChecker, TaskSolution, TaskSolutionChecker,
            TaskSolutionResult,
        },
        responses::AssignmentItem,
    },
    task_results::entities::{ScoreInput, TaskResult},
    tasks::{
        entities::{CourseTask, Task},
        requests::{CreateCourseTaskRequest, CreateTaskRequest},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

use std::sync::Arc;

/// 按配置创建存储后端并完成迁移
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过 GitHub ID 获取用户信息
    async fn get_user_by_github_id(&self, github_id: &str) -> Result<Option<User>>;
    // 通过用户名或 GitHub ID 获取用户信息
    async fn get_user_by_login(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn get_course_by_alias(&self, alias: &str) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>>;
    // 课程学生与导师的统计
    async fn get_course_stats(&self, course_id: i64) -> Result<CourseStats>;

    /// 学生与导师
    async fn enroll_student(
        &self,
        course_id: i64,
        user_id: i64,
        mentor_id: Option<i64>,
    ) -> Result<Student>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 通过 GitHub ID 查询课程中的学生
    async fn get_student_by_github_id(
        &self,
        course_id: i64,
        github_id: &str,
    ) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, course_id: i64, user_id: i64)
    -> Result<Option<Student>>;
    async fn list_course_students(&self, course_id: i64) -> Result<Vec<StudentBasic>>;
    async fn update_student_status(
        &self,
        student_id: i64,
        is_expelled: bool,
    ) -> Result<Option<Student>>;
    async fn add_mentor(&self, course_id: i64, user_id: i64, max_students: i32) -> Result<Mentor>;
    async fn get_mentor_by_github_id(
        &self,
        course_id: i64,
        github_id: &str,
    ) -> Result<Option<Mentor>>;
    async fn list_course_mentors(&self, course_id: i64) -> Result<Vec<MentorBasic>>;

    /// 任务管理方法
    async fn create_task(&self, task: CreateTaskRequest) -> Result<Task>;
    async fn get_task_by_id(&self, task_id: i64) -> Result<Option<Task>>;
    async fn create_course_task(
        &self,
        course_id: i64,
        req: CreateCourseTaskRequest,
    ) -> Result<CourseTask>;
    async fn get_course_task(&self, course_task_id: i64) -> Result<Option<CourseTask>>;
    async fn list_course_tasks(&self, course_id: i64) -> Result<Vec<CourseTask>>;

    /// 互评：作业与分配
    async fn get_task_solution(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolution>>;
    // 创建或更新作业链接
    async fn save_task_solution(
        &self,
        student_id: i64,
        course_task_id: i64,
        url: &str,
    ) -> Result<TaskSolution>;
    // 尚未分配评审人的作业
    async fn get_task_solutions_without_checker(
        &self,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolution>>;
    // 在同一事务中批量写入分配记录
    async fn create_task_solution_checkers(
        &self,
        checkers: Vec<NewTaskSolutionChecker>,
    ) -> Result<Vec<TaskSolutionChecker>>;
    async fn get_task_solution_checker(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolutionChecker>>;
    // checker 需要评审的作业
    async fn get_task_solution_assignments(
        &self,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Vec<AssignmentItem>>;

    /// 互评：评分
    async fn get_task_solution_result(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolutionResult>>;
    // 首次评分插入记录，之后追加历史并覆盖当前分数
    async fn save_task_solution_result(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
        entry: HistoricalScore,
    ) -> Result<TaskSolutionResult>;
    // 某学生收到的全部评分
    async fn list_task_solution_results_for_student(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolutionResult>>;
    async fn list_task_solution_results(
        &self,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolutionResult>>;

    /// 成绩总表
    async fn get_task_result(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskResult>>;
    async fn save_score(
        &self,
        student_id: i64,
        course_task_id: i64,
        input: ScoreInput,
    ) -> Result<TaskResult>;
    // 在同一事务中写入多条成绩，返回写入条数
    async fn save_scores(&self, course_task_id: i64, scores: Vec<(i64, ScoreInput)>)
    -> Result<usize>;
}
