//! 学习资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub section: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub class_number: i32,
    pub video_url: Option<String>,
    pub subject_id: i64,
    pub author_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::AuthorId",
        to = "super::teachers::Column::Id"
    )]
    Author,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::materials::entities::Material;
        use chrono::{DateTime, Utc};

        Material {
            id: self.id,
            title: self.title,
            section: self.section,
            content: self.content,
            class_number: self.class_number,
            video_url: self.video_url,
            subject_id: self.subject_id,
            author_id: self.author_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
