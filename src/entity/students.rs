//! 学生资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub class_id: i64,
    #[sea_orm(column_type = "Text")]
    pub info: String,
    pub profile_image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 组装学生资料，关联的用户与班级由调用方查询
    pub fn into_student(
        self,
        user: super::users::Model,
        class: super::classes::Model,
    ) -> crate::models::profiles::entities::Student {
        crate::models::profiles::entities::Student {
            id: self.id,
            user: user.into_user(),
            clazz: class.into_class(),
            info: self.info,
            profile_image_url: self.profile_image_url,
        }
    }
}
