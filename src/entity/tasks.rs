//! 任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description_url: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_tasks::Entity")]
    CourseTasks,
}

impl Related<super::course_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_task(self) -> crate::models::tasks::entities::Task {
        use crate::models::tasks::entities::Task;

        Task {
            id: self.id,
            name: self.name,
            description_url: self.description_url,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
