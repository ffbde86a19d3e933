//! 预导入模块，方便使用

pub use super::course_tasks::{
    ActiveModel as CourseTaskActiveModel, Entity as CourseTasks, Model as CourseTaskModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::mentors::{ActiveModel as MentorActiveModel, Entity as Mentors, Model as MentorModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::task_results::{
    ActiveModel as TaskResultActiveModel, Entity as TaskResults, Model as TaskResultModel,
};
pub use super::task_solution_checkers::{
    ActiveModel as TaskSolutionCheckerActiveModel, Entity as TaskSolutionCheckers,
    Model as TaskSolutionCheckerModel,
};
pub use super::task_solution_results::{
    ActiveModel as TaskSolutionResultActiveModel, Entity as TaskSolutionResults,
    Model as TaskSolutionResultModel,
};
pub use super::task_solutions::{
    ActiveModel as TaskSolutionActiveModel, Entity as TaskSolutions, Model as TaskSolutionModel,
};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
