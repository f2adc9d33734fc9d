use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub news_id: i64,
    pub posted_by: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::news::Entity",
        from = "Column::NewsId",
        to = "super::news::Column::Id"
    )]
    News,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::PostedBy",
        to = "super::students::Column::Id"
    )]
    PostedBy,
}

impl Related<super::news::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::News.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_comment(self) -> crate::models::comments::entities::Comment {
        use crate::models::comments::entities::Comment;
        use chrono::{DateTime, Utc};

        Comment {
            id: self.id,
            news_id: self.news_id,
            posted_by: self.posted_by,
            content: self.content,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
