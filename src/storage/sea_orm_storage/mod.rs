//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod cross_check;
mod task_results;
mod tasks;
mod users;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{CourseAppError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseAppError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        // 内存库随最后一个连接关闭而消失，连接必须常驻
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CourseAppError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5.min(pool_size))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseAppError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseAppError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_github_id(&self, github_id: &str) -> Result<Option<User>> {
        self.get_user_by_github_id_impl(github_id).await
    }

    async fn get_user_by_login(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_login_impl(identifier).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_alias(&self, alias: &str) -> Result<Option<Course>> {
        self.get_course_by_alias_impl(alias).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn get_course_stats(&self, course_id: i64) -> Result<CourseStats> {
        self.get_course_stats_impl(course_id).await
    }

    async fn enroll_student(
        &self,
        course_id: i64,
        user_id: i64,
        mentor_id: Option<i64>,
    ) -> Result<Student> {
        self.enroll_student_impl(course_id, user_id, mentor_id)
            .await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_github_id(
        &self,
        course_id: i64,
        github_id: &str,
    ) -> Result<Option<Student>> {
        self.get_student_by_github_id_impl(course_id, github_id)
            .await
    }

    async fn get_student_by_user_id(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(course_id, user_id).await
    }

    async fn list_course_students(&self, course_id: i64) -> Result<Vec<StudentBasic>> {
        self.list_course_students_impl(course_id).await
    }

    async fn update_student_status(
        &self,
        student_id: i64,
        is_expelled: bool,
    ) -> Result<Option<Student>> {
        self.update_student_status_impl(student_id, is_expelled)
            .await
    }

    async fn add_mentor(&self, course_id: i64, user_id: i64, max_students: i32) -> Result<Mentor> {
        self.add_mentor_impl(course_id, user_id, max_students).await
    }

    async fn get_mentor_by_github_id(
        &self,
        course_id: i64,
        github_id: &str,
    ) -> Result<Option<Mentor>> {
        self.get_mentor_by_github_id_impl(course_id, github_id)
            .await
    }

    async fn list_course_mentors(&self, course_id: i64) -> Result<Vec<MentorBasic>> {
        self.list_course_mentors_impl(course_id).await
    }

    // 任务模块
    async fn create_task(&self, task: CreateTaskRequest) -> Result<Task> {
        self.create_task_impl(task).await
    }

    async fn get_task_by_id(&self, task_id: i64) -> Result<Option<Task>> {
        self.get_task_by_id_impl(task_id).await
    }

    async fn create_course_task(
        &self,
        course_id: i64,
        req: CreateCourseTaskRequest,
    ) -> Result<CourseTask> {
        self.create_course_task_impl(course_id, req).await
    }

    async fn get_course_task(&self, course_task_id: i64) -> Result<Option<CourseTask>> {
        self.get_course_task_impl(course_task_id).await
    }

    async fn list_course_tasks(&self, course_id: i64) -> Result<Vec<CourseTask>> {
        self.list_course_tasks_impl(course_id).await
    }

    // 互评模块
    async fn get_task_solution(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolution>> {
        self.get_task_solution_impl(student_id, course_task_id)
            .await
    }

    async fn save_task_solution(
        &self,
        student_id: i64,
        course_task_id: i64,
        url: &str,
    ) -> Result<TaskSolution> {
        self.save_task_solution_impl(student_id, course_task_id, url)
            .await
    }

    async fn get_task_solutions_without_checker(
        &self,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolution>> {
        self.get_task_solutions_without_checker_impl(course_task_id)
            .await
    }

    async fn create_task_solution_checkers(
        &self,
        checkers: Vec<NewTaskSolutionChecker>,
    ) -> Result<Vec<TaskSolutionChecker>> {
        self.create_task_solution_checkers_impl(checkers).await
    }

    async fn get_task_solution_checker(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolutionChecker>> {
        self.get_task_solution_checker_impl(student_id, checker_id, course_task_id)
            .await
    }

    async fn get_task_solution_assignments(
        &self,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Vec<AssignmentItem>> {
        self.get_task_solution_assignments_impl(checker_id, course_task_id)
            .await
    }

    async fn get_task_solution_result(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskSolutionResult>> {
        self.get_task_solution_result_impl(student_id, checker_id, course_task_id)
            .await
    }

    async fn save_task_solution_result(
        &self,
        student_id: i64,
        checker_id: i64,
        course_task_id: i64,
        entry: HistoricalScore,
    ) -> Result<TaskSolutionResult> {
        self.save_task_solution_result_impl(student_id, checker_id, course_task_id, entry)
            .await
    }

    async fn list_task_solution_results_for_student(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolutionResult>> {
        self.list_task_solution_results_for_student_impl(student_id, course_task_id)
            .await
    }

    async fn list_task_solution_results(
        &self,
        course_task_id: i64,
    ) -> Result<Vec<TaskSolutionResult>> {
        self.list_task_solution_results_impl(course_task_id).await
    }

    // 成绩总表模块
    async fn get_task_result(
        &self,
        student_id: i64,
        course_task_id: i64,
    ) -> Result<Option<TaskResult>> {
        self.get_task_result_impl(student_id, course_task_id).await
    }

    async fn save_score(
        &self,
        student_id: i64,
        course_task_id: i64,
        input: ScoreInput,
    ) -> Result<TaskResult> {
        self.save_score_impl(student_id, course_task_id, input).await
    }

    async fn save_scores(
        &self,
        course_task_id: i64,
        scores: Vec<(i64, ScoreInput)>,
    ) -> Result<usize> {
        self.save_scores_impl(course_task_id, scores).await
    }
}
