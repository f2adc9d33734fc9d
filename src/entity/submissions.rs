//! 作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub homework_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub solution_url: Option<String>,
    pub checked: bool,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::homeworks::Entity",
        from = "Column::HomeworkId",
        to = "super::homeworks::Column::Id"
    )]
    Homework,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homework.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::Submission;
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            homework_id: self.homework_id,
            student_id: self.student_id,
            content: self.content,
            solution_url: self.solution_url,
            checked: self.checked,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
        }
    }
}
