use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 自增主键列
fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_column(Users::Id))
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::GithubId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().null())
                    .col(ColumnDef::new(Users::LastName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(id_column(Courses::Id))
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(
                        ColumnDef::new(Courses::Alias)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(
                        ColumnDef::new(Courses::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 导师表
        manager
            .create_table(
                Table::create()
                    .table(Mentors::Table)
                    .if_not_exists()
                    .col(id_column(Mentors::Id))
                    .col(ColumnDef::new(Mentors::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Mentors::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Mentors::MaxStudents)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(Mentors::IsExpelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Mentors::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Mentors::Table, Mentors::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Mentors::Table, Mentors::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(id_column(Students::Id))
                    .col(ColumnDef::new(Students::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Students::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Students::MentorId).big_integer().null())
                    .col(
                        ColumnDef::new(Students::IsExpelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::MentorId)
                            .to(Mentors::Table, Mentors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 任务表
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(id_column(Tasks::Id))
                    .col(ColumnDef::new(Tasks::Name).string().not_null())
                    .col(ColumnDef::new(Tasks::DescriptionUrl).string().null())
                    .col(ColumnDef::new(Tasks::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程任务表
        manager
            .create_table(
                Table::create()
                    .table(CourseTasks::Table)
                    .if_not_exists()
                    .col(id_column(CourseTasks::Id))
                    .col(
                        ColumnDef::new(CourseTasks::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseTasks::TaskId).big_integer().not_null())
                    .col(ColumnDef::new(CourseTasks::Checker).string().not_null())
                    .col(ColumnDef::new(CourseTasks::PairsCount).integer().null())
                    .col(ColumnDef::new(CourseTasks::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(CourseTasks::ScoreWeight)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(
                        ColumnDef::new(CourseTasks::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseTasks::Table, CourseTasks::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseTasks::Table, CourseTasks::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业提交表
        manager
            .create_table(
                Table::create()
                    .table(TaskSolutions::Table)
                    .if_not_exists()
                    .col(id_column(TaskSolutions::Id))
                    .col(
                        ColumnDef::new(TaskSolutions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutions::CourseTaskId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TaskSolutions::Url).string().null())
                    .col(
                        ColumnDef::new(TaskSolutions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskSolutions::Table, TaskSolutions::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskSolutions::Table, TaskSolutions::CourseTaskId)
                            .to(CourseTasks::Table, CourseTasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 互评分配表
        manager
            .create_table(
                Table::create()
                    .table(TaskSolutionCheckers::Table)
                    .if_not_exists()
                    .col(id_column(TaskSolutionCheckers::Id))
                    .col(
                        ColumnDef::new(TaskSolutionCheckers::CourseTaskId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionCheckers::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionCheckers::CheckerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionCheckers::TaskSolutionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionCheckers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskSolutionCheckers::Table, TaskSolutionCheckers::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskSolutionCheckers::Table, TaskSolutionCheckers::CheckerId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                TaskSolutionCheckers::Table,
                                TaskSolutionCheckers::TaskSolutionId,
                            )
                            .to(TaskSolutions::Table, TaskSolutions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 互评结果表
        manager
            .create_table(
                Table::create()
                    .table(TaskSolutionResults::Table)
                    .if_not_exists()
                    .col(id_column(TaskSolutionResults::Id))
                    .col(
                        ColumnDef::new(TaskSolutionResults::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionResults::CheckerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionResults::CourseTaskId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionResults::Score)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionResults::Comment)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionResults::HistoricalScores)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionResults::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskSolutionResults::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskSolutionResults::Table, TaskSolutionResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskSolutionResults::Table, TaskSolutionResults::CheckerId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                TaskSolutionResults::Table,
                                TaskSolutionResults::CourseTaskId,
                            )
                            .to(CourseTasks::Table, CourseTasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 成绩总表
        manager
            .create_table(
                Table::create()
                    .table(TaskResults::Table)
                    .if_not_exists()
                    .col(id_column(TaskResults::Id))
                    .col(
                        ColumnDef::new(TaskResults::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskResults::CourseTaskId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TaskResults::Score).double().not_null())
                    .col(ColumnDef::new(TaskResults::Comment).text().null())
                    .col(
                        ColumnDef::new(TaskResults::LastCheckerId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TaskResults::HistoricalScores)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskResults::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaskResults::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskResults::Table, TaskResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskResults::Table, TaskResults::CourseTaskId)
                            .to(CourseTasks::Table, CourseTasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_students_course_user")
                    .table(Students::Table)
                    .col(Students::CourseId)
                    .col(Students::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_mentors_course_user")
                    .table(Mentors::Table)
                    .col(Mentors::CourseId)
                    .col(Mentors::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_task_solutions_student_course_task")
                    .table(TaskSolutions::Table)
                    .col(TaskSolutions::StudentId)
                    .col(TaskSolutions::CourseTaskId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_task_solution_checkers_pair")
                    .table(TaskSolutionCheckers::Table)
                    .col(TaskSolutionCheckers::CourseTaskId)
                    .col(TaskSolutionCheckers::StudentId)
                    .col(TaskSolutionCheckers::CheckerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_task_solution_checkers_checker")
                    .table(TaskSolutionCheckers::Table)
                    .col(TaskSolutionCheckers::CheckerId)
                    .col(TaskSolutionCheckers::CourseTaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_task_solution_results_triple")
                    .table(TaskSolutionResults::Table)
                    .col(TaskSolutionResults::StudentId)
                    .col(TaskSolutionResults::CheckerId)
                    .col(TaskSolutionResults::CourseTaskId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_task_results_student_course_task")
                    .table(TaskResults::Table)
                    .col(TaskResults::StudentId)
                    .col(TaskResults::CourseTaskId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(TaskResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TaskSolutionResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TaskSolutionCheckers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TaskSolutions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Mentors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    GithubId,
    PasswordHash,
    Role,
    FirstName,
    LastName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    Alias,
    Description,
    Completed,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Mentors {
    #[sea_orm(iden = "mentors")]
    Table,
    Id,
    CourseId,
    UserId,
    MaxStudents,
    IsExpelled,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    CourseId,
    UserId,
    MentorId,
    IsExpelled,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    #[sea_orm(iden = "tasks")]
    Table,
    Id,
    Name,
    DescriptionUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CourseTasks {
    #[sea_orm(iden = "course_tasks")]
    Table,
    Id,
    CourseId,
    TaskId,
    Checker,
    PairsCount,
    MaxScore,
    ScoreWeight,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TaskSolutions {
    #[sea_orm(iden = "task_solutions")]
    Table,
    Id,
    StudentId,
    CourseTaskId,
    Url,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TaskSolutionCheckers {
    #[sea_orm(iden = "task_solution_checkers")]
    Table,
    Id,
    CourseTaskId,
    StudentId,
    CheckerId,
    TaskSolutionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TaskSolutionResults {
    #[sea_orm(iden = "task_solution_results")]
    Table,
    Id,
    StudentId,
    CheckerId,
    CourseTaskId,
    Score,
    Comment,
    HistoricalScores,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TaskResults {
    #[sea_orm(iden = "task_results")]
    Table,
    Id,
    StudentId,
    CourseTaskId,
    Score,
    Comment,
    LastCheckerId,
    HistoricalScores,
    CreatedAt,
    UpdatedAt,
}
