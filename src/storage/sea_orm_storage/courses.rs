//! 课程、学生与导师存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::{mentors, students, users};
use crate::errors::{CourseAppError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    courses::{
        entities::{Course, CourseStats, Mentor, MentorBasic, Student, StudentBasic},
        requests::{CourseListQuery, CreateCourseRequest},
    },
    users::entities::display_name,
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            alias: Set(req.alias),
            description: Set(req.description),
            completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过别名获取课程
    pub async fn get_course_by_alias_impl(&self, alias: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Alias.eq(alias))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = Courses::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(LikeExpr::new(&pattern).escape('\\')))
                    .add(Column::Alias.like(LikeExpr::new(&pattern).escape('\\'))),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询课程总数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 课程学生与导师统计
    pub async fn get_course_stats_impl(&self, course_id: i64) -> Result<CourseStats> {
        let count_err =
            |e: sea_orm::DbErr| CourseAppError::database_operation(format!("统计课程成员失败: {e}"));

        let students_total_count = students::Entity::find()
            .filter(students::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(count_err)?;
        let students_active_count = students::Entity::find()
            .filter(students::Column::CourseId.eq(course_id))
            .filter(students::Column::IsExpelled.eq(false))
            .count(&self.db)
            .await
            .map_err(count_err)?;
        let mentors_total_count = mentors::Entity::find()
            .filter(mentors::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(count_err)?;
        let mentors_active_count = mentors::Entity::find()
            .filter(mentors::Column::CourseId.eq(course_id))
            .filter(mentors::Column::IsExpelled.eq(false))
            .count(&self.db)
            .await
            .map_err(count_err)?;

        Ok(CourseStats {
            students_active_count,
            students_total_count,
            mentors_active_count,
            mentors_total_count,
        })
    }

    /// 学生加入课程
    pub async fn enroll_student_impl(
        &self,
        course_id: i64,
        user_id: i64,
        mentor_id: Option<i64>,
    ) -> Result<Student> {
        let model = students::ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            mentor_id: Set(mentor_id),
            is_expelled: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("添加学生失败: {e}")))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = students::Entity::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过 GitHub ID 查询课程中的学生
    pub async fn get_student_by_github_id_impl(
        &self,
        course_id: i64,
        github_id: &str,
    ) -> Result<Option<Student>> {
        let result = students::Entity::find()
            .inner_join(users::Entity)
            .filter(students::Column::CourseId.eq(course_id))
            .filter(users::Column::GithubId.eq(github_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<Student>> {
        let result = students::Entity::find()
            .filter(students::Column::CourseId.eq(course_id))
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出课程学生
    pub async fn list_course_students_impl(&self, course_id: i64) -> Result<Vec<StudentBasic>> {
        let rows = students::Entity::find()
            .find_also_related(users::Entity)
            .filter(students::Column::CourseId.eq(course_id))
            .order_by_asc(students::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(student, user)| {
                let user = user?;
                Some(StudentBasic {
                    id: student.id,
                    name: display_name(
                        user.first_name.as_deref(),
                        user.last_name.as_deref(),
                        &user.github_id,
                    ),
                    github_id: user.github_id,
                    is_active: !student.is_expelled,
                })
            })
            .collect())
    }

    /// 更新学生状态（在读 / 退课）
    pub async fn update_student_status_impl(
        &self,
        student_id: i64,
        is_expelled: bool,
    ) -> Result<Option<Student>> {
        let Some(existing) = students::Entity::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: students::ActiveModel = existing.into();
        model.is_expelled = Set(is_expelled);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("更新学生状态失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 添加导师
    pub async fn add_mentor_impl(
        &self,
        course_id: i64,
        user_id: i64,
        max_students: i32,
    ) -> Result<Mentor> {
        let model = mentors::ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            max_students: Set(max_students),
            is_expelled: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("添加导师失败: {e}")))?;

        Ok(result.into_mentor())
    }

    pub async fn get_mentor_by_github_id_impl(
        &self,
        course_id: i64,
        github_id: &str,
    ) -> Result<Option<Mentor>> {
        let result = mentors::Entity::find()
            .inner_join(users::Entity)
            .filter(mentors::Column::CourseId.eq(course_id))
            .filter(users::Column::GithubId.eq(github_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询导师失败: {e}")))?;

        Ok(result.map(|m| m.into_mentor()))
    }

    /// 列出课程导师
    pub async fn list_course_mentors_impl(&self, course_id: i64) -> Result<Vec<MentorBasic>> {
        let rows = mentors::Entity::find()
            .find_also_related(users::Entity)
            .filter(mentors::Column::CourseId.eq(course_id))
            .order_by_asc(mentors::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAppError::database_operation(format!("查询导师列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(mentor, user)| {
                let user = user?;
                Some(MentorBasic {
                    id: mentor.id,
                    name: display_name(
                        user.first_name.as_deref(),
                        user.last_name.as_deref(),
                        &user.github_id,
                    ),
                    github_id: user.github_id,
                    max_students: mentor.max_students,
                    is_active: !mentor.is_expelled,
                })
            })
            .collect())
    }
}
