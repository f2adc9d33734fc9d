//! 学习资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{ElsyserError, Result};
use crate::models::materials::{
    entities::{Material, MaterialListQuery, NewMaterial},
    requests::UpdateMaterialRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_material_impl(&self, req: NewMaterial) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let result = ActiveModel {
            title: Set(req.title),
            section: Set(req.section),
            content: Set(req.content),
            class_number: Set(req.class_number),
            video_url: Set(req.video_url),
            subject_id: Set(req.subject_id),
            author_id: Set(req.author_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ElsyserError::database_operation(format!("创建学习资料失败: {e}")))?;

        Ok(result.into_material())
    }

    pub async fn get_material_by_id_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询学习资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    pub async fn list_materials_impl(&self, query: MaterialListQuery) -> Result<Vec<Material>> {
        let mut select = Materials::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(class_number) = query.class_number {
            select = select.filter(Column::ClassNumber.eq(class_number));
        }

        let results = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("查询学习资料列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_material()).collect())
    }

    /// 更新学习资料；video_url 传空串表示清除
    pub async fn update_material_impl(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        if self.get_material_by_id_impl(material_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(material_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(section) = update.section {
            model.section = Set(section);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(class_number) = update.class_number {
            model.class_number = Set(class_number);
        }
        if let Some(video_url) = update.video_url {
            model.video_url = Set(Some(video_url).filter(|url| !url.is_empty()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("更新学习资料失败: {e}")))?;

        self.get_material_by_id_impl(material_id).await
    }

    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElsyserError::database_operation(format!("删除学习资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
